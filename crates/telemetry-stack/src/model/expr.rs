//! Attribute values that may embed lazy references.

use serde::{Serialize, Serializer};

use crate::model::{AttrRef, Tags};

/// Escape the engine's template sequences so `text` renders verbatim:
/// `${` becomes `$${` and `%{` becomes `%%{`.
pub fn escape_template(text: &str) -> String {
    text.replace("${", "$${").replace("%{", "%%{")
}

/// Serialize a plain string attribute with template sequences escaped.
pub(crate) fn escaped<S: Serializer>(text: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&escape_template(text))
}

/// Serialize tags with template sequences escaped in keys and values.
pub(crate) fn escaped_tags<S: Serializer>(tags: &Tags, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        tags.iter()
            .map(|(key, value)| (escape_template(key), escape_template(value))),
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Text(String),
    Ref(AttrRef),
}

/// A string attribute assembled from literal text and attribute references,
/// e.g. `s3://${aws_s3_bucket.telemetry.id}/data/`.
///
/// Serializes to the engine's template syntax. Literal text goes through
/// [`escape_template`] so that only real references get interpolated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expr {
    parts: Vec<Part>,
}

impl Expr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    /// Append literal text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(Part::Text(text));
        }
        self
    }

    /// Append a reference.
    pub fn attr(mut self, reference: &AttrRef) -> Self {
        self.parts.push(Part::Ref(reference.clone()));
        self
    }

    pub fn refs(&self) -> impl Iterator<Item = &AttrRef> {
        self.parts.iter().filter_map(|part| match part {
            Part::Ref(r) => Some(r),
            Part::Text(_) => None,
        })
    }

    /// True when the value starts with a reference, such as `${arn}/*`.
    pub fn is_derived(&self) -> bool {
        matches!(self.parts.first(), Some(Part::Ref(_)))
    }

    pub fn render(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => escape_template(text),
                Part::Ref(r) => r.to_string(),
            })
            .collect()
    }
}

impl From<&AttrRef> for Expr {
    fn from(reference: &AttrRef) -> Self {
        Self::new().attr(reference)
    }
}

impl From<AttrRef> for Expr {
    fn from(reference: AttrRef) -> Self {
        Self {
            parts: vec![Part::Ref(reference)],
        }
    }
}

impl From<&str> for Expr {
    fn from(text: &str) -> Self {
        Self::literal(text)
    }
}

impl From<String> for Expr {
    fn from(text: String) -> Self {
        Self::literal(text)
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResourceAddress, ResourceKind};

    fn bucket() -> ResourceAddress {
        ResourceAddress::new(ResourceKind::S3Bucket, "telemetry")
    }

    #[test]
    fn test_template_render() {
        let expr = Expr::literal("s3://").attr(&bucket().attr("id")).text("/data/");
        assert_eq!(expr.render(), "s3://${aws_s3_bucket.telemetry.id}/data/");
        assert_eq!(expr.refs().count(), 1);
        assert!(!expr.is_derived());
        assert!(Expr::from(bucket().attr("arn")).text("/*").is_derived());
    }

    #[test]
    fn test_literal_escapes_interpolation() {
        let expr = Expr::literal("cost ${total}");
        assert_eq!(expr.render(), "cost $${total}");
        assert_eq!(expr.refs().count(), 0);
    }

    #[test]
    fn test_serializes_as_string() {
        let expr = Expr::from(bucket().attr("arn")).text("/*");
        assert_eq!(
            serde_json::to_string(&expr).unwrap(),
            r#""${aws_s3_bucket.telemetry.arn}/*""#
        );
    }

    #[test]
    fn test_literal_escapes_template_directive() {
        assert_eq!(Expr::literal("100%{if x}").render(), "100%%{if x}");
        assert_eq!(Expr::literal("50% off").render(), "50% off");
    }

    #[test]
    fn test_escaped_tags() {
        #[derive(Serialize)]
        struct Tagged {
            #[serde(serialize_with = "escaped_tags")]
            tags: Tags,
        }

        let tagged = Tagged {
            tags: Tags::from([("Project".to_string(), "${acme}".to_string())]),
        };
        assert_eq!(
            serde_json::to_value(&tagged).unwrap()["tags"]["Project"],
            "$${acme}"
        );
    }

    #[test]
    fn test_empty_text_is_dropped() {
        assert_eq!(Expr::literal(""), Expr::new());
    }
}
