//! CSS Selectors Module
//!
//! Selector AST and a parser for the subset views query with: compound
//! selectors, attribute matchers, structural pseudo-classes, `:not()` and
//! the four combinators.

use std::str::FromStr;

use crate::CssError;

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list such as `ul > li.item, a[href]`
    pub fn parse(text: &str) -> Result<Self, CssError> {
        let mut parser = Parser::new(text);
        let list = parser.parse_list()?;
        tracing::trace!("Parsed selector `{}` into {} alternatives", text, list.selectors.len());
        Ok(list)
    }
}

impl FromStr for SelectorList {
    type Err = CssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Compound selectors joined by combinators, read left to right
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    pub combinators: Vec<Combinator>,
}

/// Combinator between two compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// A component of a selector
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    Disabled,
    Enabled,
    Checked,
    Not(Box<CompoundSelector>),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase().replace(' ', "");

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a_str => a_str.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() { 0 } else { rest.parse().ok()? };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        let diff = n - self.b;
        if self.a > 0 {
            diff >= 0 && diff % self.a == 0
        } else {
            diff <= 0 && diff % self.a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(matcher), Some(value)) => (matcher, value),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            AttributeMatcher::Prefix(expected) => {
                !expected.is_empty() && val.starts_with(&fold(expected))
            }
            AttributeMatcher::Suffix(expected) => {
                !expected.is_empty() && val.ends_with(&fold(expected))
            }
            AttributeMatcher::Substring(expected) => {
                !expected.is_empty() && val.contains(&fold(expected))
            }
        }
    }
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars().collect(), pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> CssError {
        CssError::InvalidSelector {
            selector: self.text.to_string(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), CssError> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected `{expected}`, found `{c}`"))),
            None => Err(self.error(format!("expected `{expected}`, found end of input"))),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> Result<SelectorList, CssError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_whitespace();
            selectors.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.bump() {
                None => break,
                Some(',') => continue,
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector, CssError> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(_) if had_space => {
                    combinators.push(Combinator::Descendant);
                    compounds.push(self.parse_compound()?);
                    continue;
                }
                Some(c) => return Err(self.error(format!("unexpected `{c}`"))),
            };
            self.pos += 1;
            self.skip_whitespace();
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, CssError> {
        let mut components = Vec::new();

        loop {
            let component = match self.peek() {
                Some('*') => {
                    self.pos += 1;
                    SelectorComponent::Universal
                }
                Some('.') => {
                    self.pos += 1;
                    SelectorComponent::Class(self.parse_ident()?)
                }
                Some('#') => {
                    self.pos += 1;
                    SelectorComponent::Id(self.parse_ident()?)
                }
                Some('[') => {
                    self.pos += 1;
                    SelectorComponent::Attribute(self.parse_attribute()?)
                }
                Some(':') => {
                    self.pos += 1;
                    SelectorComponent::PseudoClass(self.parse_pseudo_class()?)
                }
                Some(c) if is_ident_char(c) && components.is_empty() => {
                    SelectorComponent::Type(self.parse_ident()?.to_ascii_lowercase())
                }
                _ => break,
            };
            components.push(component);
        }

        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a selector, found `{c}`")),
                None => self.error("expected a selector, found end of input"),
            });
        }
        Ok(CompoundSelector { components })
    }

    fn parse_ident(&mut self) -> Result<String, CssError> {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                match self.bump() {
                    Some(escaped) => ident.push(escaped),
                    None => return Err(self.error("dangling escape")),
                }
            } else if is_ident_char(c) {
                ident.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        if ident.is_empty() {
            return Err(self.error("expected an identifier"));
        }
        Ok(ident)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, CssError> {
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        if self.eat(']') {
            return Ok(AttributeSelector { name, matcher: None, case_insensitive: false });
        }

        let op = match self.bump() {
            Some('=') => '=',
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.expect('=')?;
                c
            }
            Some(c) => return Err(self.error(format!("unknown attribute operator `{c}`"))),
            None => return Err(self.error("unterminated attribute selector")),
        };

        self.skip_whitespace();
        let value = self.parse_attribute_value()?;
        self.skip_whitespace();

        let mut case_insensitive = false;
        match self.peek() {
            Some('i' | 'I') => {
                self.pos += 1;
                case_insensitive = true;
            }
            Some('s' | 'S') => self.pos += 1,
            _ => {}
        }
        self.skip_whitespace();
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    /// Quoted strings or bare identifiers. A bare value may start with a
    /// digit, so `[data-item-number=3]` works.
    fn parse_attribute_value(&mut self) -> Result<String, CssError> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let mut value = String::new();
                loop {
                    match self.bump() {
                        Some('\\') => match self.bump() {
                            Some(escaped) => value.push(escaped),
                            None => return Err(self.error("dangling escape")),
                        },
                        Some(c) if c == quote => return Ok(value),
                        Some(c) => value.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                }
            }
            Some(c) if is_ident_char(c) || c == '\\' => self.parse_ident(),
            Some(c) => Err(self.error(format!("unexpected `{c}` in attribute value"))),
            None => Err(self.error("missing attribute value")),
        }
    }

    fn parse_pseudo_class(&mut self) -> Result<PseudoClass, CssError> {
        if self.peek() == Some(':') {
            return Err(self.error("pseudo-elements cannot be queried"));
        }
        let name = self.parse_ident()?.to_ascii_lowercase();
        let argument = if self.eat('(') { Some(self.parse_argument()?) } else { None };

        let pseudo = match (name.as_str(), argument) {
            ("root", None) => PseudoClass::Root,
            ("empty", None) => PseudoClass::Empty,
            ("first-child", None) => PseudoClass::FirstChild,
            ("last-child", None) => PseudoClass::LastChild,
            ("only-child", None) => PseudoClass::OnlyChild,
            ("disabled", None) => PseudoClass::Disabled,
            ("enabled", None) => PseudoClass::Enabled,
            ("checked", None) => PseudoClass::Checked,
            ("nth-child", Some(arg)) => PseudoClass::NthChild(self.parse_nth(&arg)?),
            ("nth-last-child", Some(arg)) => PseudoClass::NthLastChild(self.parse_nth(&arg)?),
            ("not", Some(arg)) => {
                let mut inner = Parser::new(arg.trim());
                let compound = inner.parse_compound()?;
                if inner.peek().is_some() {
                    return Err(self.error(":not() accepts a single compound selector"));
                }
                PseudoClass::Not(Box::new(compound))
            }
            (other, _) => return Err(self.error(format!("unsupported pseudo-class `:{other}`"))),
        };
        Ok(pseudo)
    }

    fn parse_nth(&self, argument: &str) -> Result<NthExpression, CssError> {
        NthExpression::parse(argument)
            .ok_or_else(|| self.error(format!("invalid An+B expression `{argument}`")))
    }

    /// Text up to the matching `)`, which is consumed
    fn parse_argument(&mut self) -> Result<String, CssError> {
        let mut depth = 0usize;
        let mut argument = String::new();
        loop {
            match self.bump() {
                Some('(') => {
                    depth += 1;
                    argument.push('(');
                }
                Some(')') if depth == 0 => return Ok(argument),
                Some(')') => {
                    depth -= 1;
                    argument.push(')');
                }
                Some(c) => argument.push(c),
                None => return Err(self.error("unterminated `(`")),
            }
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> ComplexSelector {
        let mut list = SelectorList::parse(text).unwrap();
        assert_eq!(list.selectors.len(), 1);
        list.selectors.remove(0)
    }

    #[test]
    fn test_nth_expression_odd() {
        let expr = NthExpression::odd();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));
    }

    #[test]
    fn test_nth_expression_parse() {
        assert_eq!(NthExpression::parse("odd"), Some(NthExpression::odd()));
        assert_eq!(NthExpression::parse("even"), Some(NthExpression::even()));
        assert_eq!(NthExpression::parse("3"), Some(NthExpression::index(3)));
        assert_eq!(NthExpression::parse("2n + 1"), Some(NthExpression::new(2, 1)));
        assert_eq!(NthExpression::parse("-n+3"), Some(NthExpression::new(-1, 3)));
        assert_eq!(NthExpression::parse("x"), None);
    }

    #[test]
    fn test_attribute_selector_exact() {
        let sel = AttributeSelector {
            name: "type".to_string(),
            matcher: Some(AttributeMatcher::Exact("text".to_string())),
            case_insensitive: false,
        };

        assert!(sel.matches(Some("text")));
        assert!(!sel.matches(Some("TEXT")));
        assert!(!sel.matches(None));
    }

    #[test]
    fn test_parse_compound() {
        let sel = single("div.item#main");
        assert_eq!(sel.compounds[0].components, vec![
            SelectorComponent::Type("div".into()),
            SelectorComponent::Class("item".into()),
            SelectorComponent::Id("main".into()),
        ]);
    }

    #[test]
    fn test_parse_combinators() {
        let sel = single("ul > li  a + b ~ i");
        assert_eq!(sel.compounds.len(), 5);
        assert_eq!(sel.combinators, vec![
            Combinator::Child,
            Combinator::Descendant,
            Combinator::NextSibling,
            Combinator::SubsequentSibling,
        ]);
    }

    #[test]
    fn test_parse_bare_attribute_value() {
        let sel = single(".list__item[data-item-number=3]");
        assert_eq!(sel.compounds[0].components[1], SelectorComponent::Attribute(AttributeSelector {
            name: "data-item-number".into(),
            matcher: Some(AttributeMatcher::Exact("3".into())),
            case_insensitive: false,
        }));
    }

    #[test]
    fn test_parse_focusable_list() {
        let list = SelectorList::parse("[tabindex],a,button:not(:disabled)").unwrap();
        assert_eq!(list.selectors.len(), 3);
        let button = &list.selectors[2].compounds[0].components;
        assert_eq!(button[1], SelectorComponent::PseudoClass(PseudoClass::Not(Box::new(
            CompoundSelector {
                components: vec![SelectorComponent::PseudoClass(PseudoClass::Disabled)],
            }
        ))));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SelectorList::parse("").is_err());
        assert!(SelectorList::parse(".").is_err());
        assert!(SelectorList::parse("a,").is_err());
        assert!(SelectorList::parse("p::before").is_err());
        assert!(SelectorList::parse("a:hover").is_err());
        assert!(SelectorList::parse("[x=\"open").is_err());
        assert!(SelectorList::parse("a >").is_err());
        assert!(SelectorList::parse("[x=%s]").is_err());
    }
}
