use crate::ValueType;

/// How bounds edges are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measurement {
    /// Unit doubles (the host's usual encoding).
    #[default]
    UnitDouble,
    /// Plain doubles.
    Double,
}

impl Measurement {
    /// The value type read for each edge.
    pub const fn value_type(self) -> ValueType {
        match self {
            Measurement::UnitDouble => ValueType::UnitDouble,
            Measurement::Double => ValueType::Double,
        }
    }
}

/// Options shared by every navigator of a [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct NavOptions {
    /// Key of the nested bounds object (default: `"bounds"`)
    pub bounds_key: String,
    /// Keys of the left, top, right and bottom edges
    pub edge_keys: [String; 4],
    /// Encoding of the edges (default: unit doubles)
    pub measurement: Measurement,
    /// Key holding an object's name, used by [`Session::named`](crate::Session::named)
    /// (default: `"name"`)
    pub name_key: String,
    /// Trim whitespace before comparing names (default: true)
    pub trim_names: bool,
    /// Compare names case-sensitively (default: false)
    pub match_case: bool,
}

impl Default for NavOptions {
    fn default() -> Self {
        Self {
            bounds_key: "bounds".into(),
            edge_keys: ["left", "top", "right", "bottom"].map(String::from),
            measurement: Measurement::default(),
            name_key: "name".into(),
            trim_names: true,
            match_case: false,
        }
    }
}

impl NavOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read bounds from another key.
    pub fn bounds_key(mut self, key: impl Into<String>) -> Self {
        self.bounds_key = key.into();
        self
    }

    /// Read the four edges from other keys.
    pub fn edge_keys(mut self, left: &str, top: &str, right: &str, bottom: &str) -> Self {
        self.edge_keys = [left, top, right, bottom].map(String::from);
        self
    }

    /// Read edges as `measurement`.
    pub fn measurement(mut self, measurement: Measurement) -> Self {
        self.measurement = measurement;
        self
    }

    /// Match names against another key.
    pub fn name_key(mut self, key: impl Into<String>) -> Self {
        self.name_key = key.into();
        self
    }

    /// Compare names exactly: no trimming, case-sensitive.
    pub fn exact_names(mut self) -> Self {
        self.trim_names = false;
        self.match_case = true;
        self
    }

    /// Whether `candidate` names the object called `wanted`.
    pub(crate) fn names_match(&self, candidate: &str, wanted: &str) -> bool {
        let (candidate, wanted) = if self.trim_names {
            (candidate.trim(), wanted.trim())
        } else {
            (candidate, wanted)
        };
        if self.match_case {
            candidate == wanted
        } else {
            candidate.to_lowercase() == wanted.to_lowercase()
        }
    }
}
