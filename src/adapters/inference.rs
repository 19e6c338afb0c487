//! Inference server adapter.
//!
//! Implements [`PestDetector`] by POSTing the frame as a multipart upload
//! (field `file`, filename `pest.jpg`) and parsing the plain-text answer:
//!
//! | Body      | Meaning                          |
//! |-----------|----------------------------------|
//! | `""`      | no pest in this frame            |
//! | `"X,Y"`   | pest at pixel `(X, Y)`           |
//! | anything  | fatal [`ProtocolError`]          |
//!
//! No request timeout is set: a hung server hangs the loop.

use core::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};

use crate::app::ports::PestDetector;
use crate::error::{CommsError, Error, ProtocolError, ProtocolErrorKind, Result};
use crate::plane::Coordinate;

/// Parse an inference server response body.
pub fn parse_response(body: &str) -> core::result::Result<Option<Coordinate>, ProtocolError> {
    if body.is_empty() {
        return Ok(None);
    }

    let malformed = |kind| ProtocolError {
        kind,
        body: body.to_owned(),
    };

    let mut fields = body.split(',');
    let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed(ProtocolErrorKind::WrongFieldCount));
    };

    let x: i32 = x
        .trim()
        .parse()
        .map_err(|_| malformed(ProtocolErrorKind::InvalidInteger))?;
    let y: i32 = y
        .trim()
        .parse()
        .map_err(|_| malformed(ProtocolErrorKind::InvalidInteger))?;

    Ok(Some(Coordinate::new(f64::from(x), f64::from(y))))
}

/// Blocking HTTP client for the pest-detection endpoint.
pub struct HttpDetector {
    client: Client,
    url: String,
}

impl HttpDetector {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(request_failed)?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl PestDetector for HttpDetector {
    fn detect(&mut self, jpeg: &[u8]) -> Result<Option<Coordinate>> {
        let part = Part::bytes(jpeg.to_vec())
            .file_name("pest.jpg")
            .mime_str("image/jpeg")
            .map_err(request_failed)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CommsError::HttpStatus(status.as_u16()).into());
        }

        let body = response.text().map_err(request_failed)?;
        debug!("Inference server responded with: [{}]", body);
        Ok(parse_response(&body)?)
    }
}

fn request_failed(e: reqwest::Error) -> Error {
    CommsError::RequestFailed(e.to_string()).into()
}
