use std::fmt;

/// A search predicate in the content API's query syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    At { path: String, value: String },
}

impl Predicate {
    pub fn at(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::At {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn document_type(document_type: &str) -> Self {
        Self::at("document.type", document_type)
    }

    pub fn uid(document_type: &str, uid: &str) -> Self {
        Self::at(format!("my.{}.uid", document_type), uid)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At { path, value } => {
                write!(f, "[at({}, \"{}\")]", path, value.replace('"', "\\\""))
            }
        }
    }
}

/// Joins predicates into the `q` parameter, e.g. `[[at(document.type, "posts")]]`.
pub fn query_string(predicates: &[Predicate]) -> String {
    let inner: String = predicates.iter().map(|p| p.to_string()).collect();
    format!("[{}]", inner)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

impl Ordering {
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }
}

/// Renders the `orderings` parameter, e.g. `[document.first_publication_date desc]`.
pub fn orderings_string(orderings: &[Ordering]) -> String {
    let fields: Vec<String> = orderings
        .iter()
        .map(|o| {
            if o.descending {
                format!("{} desc", o.field)
            } else {
                o.field.clone()
            }
        })
        .collect();
    format!("[{}]", fields.join(","))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub fetch: Vec<String>,
    pub orderings: Vec<Ordering>,
    pub page_size: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            fetch: Vec::new(),
            orderings: Vec::new(),
            page_size: 20,
        }
    }
}
