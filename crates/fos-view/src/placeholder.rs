//! Placeholder substitution
//!
//! Templates carry `%s` (positional, consumed left to right) and `%(key)s`
//! (named, key is `[A-Za-z0-9_]*`, possibly empty). Any other `%` sequence
//! is literal text.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ElementsError, Result};

/// A replacement value, already in its text form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Arg(String);

impl Arg {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! arg_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

arg_from_display!(
    &str, String, &String, char, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32,
    f64,
);

/// Replacement values for a template.
///
/// `Named` serves both syntaxes: `%s` number N reads the key `"N"`, which
/// is how a numerically keyed map fills positional slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Placeholders {
    /// No values; substitution is refused
    #[default]
    None,
    Positional(Vec<Arg>),
    Named(BTreeMap<String, Arg>),
}

impl Placeholders {
    /// Positional values. An empty list means no values at all.
    pub fn positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        let values: Vec<Arg> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            Self::None
        } else {
            Self::Positional(values)
        }
    }

    /// Named values. An empty map is still a (useless) value source.
    pub fn named<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Arg>,
    {
        Self::Named(
            values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn lookup(&self, slot: &Slot) -> Option<&Arg> {
        match (self, slot) {
            (Self::Positional(values), Slot::Position(n)) => values.get(n - 1),
            (Self::Named(values), Slot::Position(n)) => values.get(&n.to_string()),
            (Self::Named(values), Slot::Key(key)) => values.get(key),
            _ => None,
        }
    }
}

impl From<()> for Placeholders {
    fn from(_: ()) -> Self {
        Self::None
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Placeholders {
    fn from(values: Vec<T>) -> Self {
        Self::positional(values)
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Placeholders {
    fn from(values: [T; N]) -> Self {
        Self::positional(values)
    }
}

impl From<BTreeMap<String, Arg>> for Placeholders {
    fn from(values: BTreeMap<String, Arg>) -> Self {
        Self::Named(values)
    }
}

impl fmt::Display for Placeholders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Positional(values) => {
                let parts: Vec<&str> = values.iter().map(Arg::as_str).collect();
                write!(f, "({})", parts.join(", "))
            }
            Self::Named(values) => {
                let parts: Vec<String> = values.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

/// The placeholder a substitution failed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// 1-based position of a `%s`
    Position(usize),
    /// Key of a `%(key)s`
    Key(String),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(n) => write!(f, "position {n}"),
            Self::Key(key) => write!(f, "key `{key}`"),
        }
    }
}

/// Replace every placeholder of `template` with its value.
///
/// Values are inserted verbatim and never rescanned. `0`, `""` and `false`
/// are ordinary values; only an absent value is an error.
pub fn substitute(template: &str, args: &Placeholders) -> Result<String> {
    if args.is_none() {
        return Err(ElementsError::Template {
            template: template.to_string(),
        });
    }

    let mut out = String::with_capacity(template.len());
    let mut position = 0;
    let mut rest = template;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some((key, consumed)) = parse_placeholder(after) else {
            out.push('%');
            rest = after;
            continue;
        };

        let slot = match key {
            Some(key) => Slot::Key(key.to_string()),
            None => {
                position += 1;
                Slot::Position(position)
            }
        };
        let value = args.lookup(&slot).ok_or_else(|| ElementsError::Substitution {
            template: template.to_string(),
            slot: slot.clone(),
        })?;
        out.push_str(value.as_str());
        rest = &after[consumed..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Recognize `s` or `(key)s` right after a `%`.
/// Returns the key (`None` for positional) and the bytes consumed.
fn parse_placeholder(after: &str) -> Option<(Option<&str>, usize)> {
    if after.starts_with('s') {
        return Some((None, 1));
    }

    let inner = after.strip_prefix('(')?;
    let close = inner.find(')')?;
    let key = &inner[..close];
    if !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    inner[close + 1..]
        .starts_with('s')
        .then_some((Some(key), close + 3))
}
