use crate::ids::InvocationId;

/// An uploaded file part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FormFile {
    #[must_use]
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FormFile),
}

/// Ordered `key → text | file` fields encoded as `multipart/form-data`.
///
/// ```rust
/// use routeshim::helpers::{FormData, FormFile};
///
/// let (content_type, body) = FormData::with_boundary("XYZ")
///     .text("name", "Fluffy")
///     .file("photo", FormFile::new("cat.png", "image/png", vec![1, 2, 3]))
///     .into_multipart();
///
/// assert_eq!(content_type, "multipart/form-data; boundary=XYZ");
/// assert!(body.starts_with(b"--XYZ\r\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    boundary: String,
    fields: Vec<(String, FormValue)>,
}

impl Default for FormData {
    fn default() -> Self {
        Self::new()
    }
}

impl FormData {
    /// Empty form with a unique boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_boundary(format!("routeshim-{}", InvocationId::new()))
    }

    /// Empty form with a caller-chosen boundary; useful for byte-exact assertions.
    #[must_use]
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FormFile) -> Self {
        self.fields.push((name.into(), FormValue::File(file)));
        self
    }

    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    #[must_use]
    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// Encode as `(content-type header value, body)`.
    #[must_use]
    pub fn into_multipart(self) -> (String, Vec<u8>) {
        let mut body = Vec::new();
        for (name, value) in &self.fields {
            body.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match value {
                FormValue::Text(text) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_quoted(name)
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(text.as_bytes());
                }
                FormValue::File(file) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                             Content-Type: {}\r\n\r\n",
                            escape_quoted(name),
                            escape_quoted(&file.filename),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(&file.bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        (
            format!("multipart/form-data; boundary={}", self.boundary),
            body,
        )
    }
}

fn escape_quoted(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_file_parts() {
        let (content_type, body) = FormData::with_boundary("B")
            .text("name", "Rex")
            .file("doc", FormFile::new("a.txt", "text/plain", b"hi".to_vec()))
            .into_multipart();

        assert_eq!(content_type, "multipart/form-data; boundary=B");
        let expected = "--B\r\n\
            Content-Disposition: form-data; name=\"name\"\r\n\r\n\
            Rex\r\n\
            --B\r\n\
            Content-Disposition: form-data; name=\"doc\"; filename=\"a.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            hi\r\n\
            --B--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn test_empty_form_is_just_the_terminator() {
        let (_, body) = FormData::with_boundary("B").into_multipart();
        assert_eq!(body, b"--B--\r\n");
    }

    #[test]
    fn test_quotes_in_names_are_escaped() {
        let (_, body) = FormData::with_boundary("B").text("a\"b", "v").into_multipart();
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("name=\"a\\\"b\""));
    }

    #[test]
    fn test_generated_boundaries_differ() {
        assert_ne!(FormData::new().boundary(), FormData::new().boundary());
    }
}
