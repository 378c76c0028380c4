//! Addresses of nodes inside a document.

use core::fmt;
use core::str::FromStr;

use gcfeeder_errors::SchemaError;

/// One step of a [`DocumentPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Object property
    Key(String),
    /// Array element
    Index(usize),
}

/// A sequence of key/index segments addressing a node.
///
/// Displayed as `calibration.stick_data.main_stick.notch_points[3][0]`.
///
/// ```
/// use gcfeeder_schema::DocumentPath;
///
/// let path = DocumentPath::root()
///     .key("calibration")
///     .key("stick_data")
///     .key("main_stick")
///     .key("notch_points")
///     .index(3)
///     .index(0);
/// assert_eq!(path.to_string(), "calibration.stick_data.main_stick.notch_points[3][0]");
///
/// let parsed: DocumentPath = "calibration.stick_data.main_stick.notch_points[3][0]".parse()?;
/// assert_eq!(parsed, path);
/// # Ok::<(), gcfeeder_errors::SchemaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    segments: Vec<PathSegment>,
}

impl DocumentPath {
    /// The empty path, addressing the document itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend with an object key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Extend with an array index.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::Index(index));
        self
    }

    /// A copy of this path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// A copy of this path extended with `key`.
    #[must_use]
    pub fn with_key(&self, key: &str) -> Self {
        self.child(PathSegment::Key(key.to_string()))
    }

    /// A copy of this path extended with `index`.
    #[must_use]
    pub fn with_index(&self, index: usize) -> Self {
        self.child(PathSegment::Index(index))
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The final key segment, used to look up default factories.
    pub fn last_key(&self) -> Option<&str> {
        self.segments.iter().rev().find_map(|segment| match segment {
            PathSegment::Key(key) => Some(key.as_str()),
            PathSegment::Index(_) => None,
        })
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) if first => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
            first = false;
        }
        Ok(())
    }
}

impl FromStr for DocumentPath {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut path = DocumentPath::root();
        for part in s.split('.').filter(|p| !p.is_empty()) {
            let (key, mut rest) = match part.find('[') {
                Some(open) => part.split_at(open),
                None => (part, ""),
            };
            if !key.is_empty() {
                path = path.key(key);
            }
            while let Some(stripped) = rest.strip_prefix('[') {
                let close = stripped
                    .find(']')
                    .ok_or_else(|| SchemaError::invalid_edit(s, "unterminated index"))?;
                let (digits, tail) = stripped.split_at(close);
                let index = digits
                    .parse::<usize>()
                    .map_err(|e| SchemaError::invalid_edit(s, format!("bad index: {e}")))?;
                path = path.index(index);
                rest = tail.strip_prefix(']').unwrap_or(tail);
            }
            if !rest.is_empty() {
                return Err(SchemaError::invalid_edit(
                    s,
                    format!("unexpected '{rest}' after index"),
                ));
            }
        }
        Ok(path)
    }
}
