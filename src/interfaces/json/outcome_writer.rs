use crate::error::{ErrorKind, OrderError, Result};
use serde::Serialize;
use serde_json::value::RawValue;
use std::io::Write;

#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Error,
}

/// The result of one invocation as reported to the caller.
#[derive(Debug, Serialize)]
pub struct Outcome<'a> {
    pub function: &'a str,
    pub status: OutcomeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Box<RawValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<'a> Outcome<'a> {
    pub fn from_result(function: &'a str, result: &Result<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(payload) => Self {
                function,
                status: OutcomeStatus::Success,
                payload: payload.as_deref().and_then(|bytes| {
                    let text = std::str::from_utf8(bytes).ok()?;
                    RawValue::from_string(text.to_string()).ok()
                }),
                kind: None,
                message: None,
            },
            Err(e) => Self::failure(function, e),
        }
    }

    pub fn failure(function: &'a str, error: &OrderError) -> Self {
        Self {
            function,
            status: OutcomeStatus::Error,
            payload: None,
            kind: Some(error.kind()),
            message: Some(error.to_string()),
        }
    }
}

/// Writes one JSON object per line.
pub struct OutcomeWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write(&mut self, outcome: &Outcome<'_>) -> Result<()> {
        serde_json::to_writer(&mut self.writer, outcome).map_err(std::io::Error::from)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(outcome: &Outcome<'_>) -> String {
        let mut buf = Vec::new();
        let mut writer = OutcomeWriter::new(&mut buf);
        writer.write(outcome).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_success_without_payload() {
        let line = render(&Outcome::from_result("createOrder", &Ok(None)));
        assert_eq!(line, "{\"function\":\"createOrder\",\"status\":\"success\"}\n");
    }

    #[test]
    fn test_success_with_payload_is_inlined() {
        let result = Ok(Some(br#"{"orderid":"1"}"#.to_vec()));
        let line = render(&Outcome::from_result("queryOrder", &result));
        assert_eq!(
            line,
            "{\"function\":\"queryOrder\",\"status\":\"success\",\"payload\":{\"orderid\":\"1\"}}\n"
        );
    }

    #[test]
    fn test_failure_carries_kind_and_message() {
        let result = Err(OrderError::NotFound("K9".to_string()));
        let line = render(&Outcome::from_result("advanceOrder", &result));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["kind"], "NotFound");
        assert_eq!(value["message"], "Order not found: K9");
    }
}
