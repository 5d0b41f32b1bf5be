use crate::colors::color_from_name;
use std::fmt::{Display, Formatter};
use veld_shared::location::SourceSpan;

/// Function name that references another class by qualified name.
pub const CLASS_REFERENCE: &str = "ClassReference";
/// Function name that references a property of the styled component.
pub const PROPERTY_REFERENCE: &str = "PropertyReference";
/// Function name that embeds an external asset into the compilation.
pub const EMBED: &str = "Embed";

/// No-break space, kept in escaped form inside string values
const NO_BREAK_SPACE: u32 = 0xA0;
/// Zero-width space, kept in escaped form inside string values
const ZERO_WIDTH_SPACE: u32 = 0x200B;

#[derive(Debug, Clone, PartialEq)]
pub enum CssValueKind {
    /// Bare identifier that is not a known color name
    Keyword {
        text: String,
    },
    /// Hex or named color; `text` is the source form (`#fc0`, `red`)
    Color {
        rgb: u32,
        text: String,
    },
    /// `rgb(...)` packed as `(r << 16) | (g << 8) | b`
    Rgb {
        rgb: u32,
        raw: String,
    },
    /// `rgba(...)` packed as `(a << 24) | (r << 16) | (g << 8) | b`.
    /// The alpha byte sits in the most significant position; downstream
    /// binary consumers rely on that exact layout.
    Rgba {
        argb: u32,
        raw: String,
    },
    /// Number with whatever trailed the numeric match captured as the unit
    Number {
        value: f64,
        unit: Option<String>,
        raw: String,
    },
    /// Quote-stripped string with escapes converted
    Str {
        value: String,
        raw: String,
    },
    /// Comma-separated value list
    Multi {
        elements: Vec<CssValue>,
    },
    /// Any `name(...)`; `raw_arguments` is the text between the outermost
    /// parentheses, verbatim
    FunctionCall {
        name: String,
        raw_arguments: String,
    },
    /// `url(...)`/`local(...)` with a trailing `format(...)` hint
    Url {
        name: String,
        raw_arguments: String,
        format: Option<String>,
    },
}

/// A single typed property value with its source region.
#[derive(Debug, Clone, PartialEq)]
pub struct CssValue {
    pub kind: CssValueKind,
    pub span: SourceSpan,
}

impl CssValue {
    /// A bare identifier. Identifiers naming a known color become colors.
    #[must_use]
    pub fn keyword(text: &str, span: SourceSpan) -> Self {
        match color_from_name(text) {
            Some(rgb) => Self {
                kind: CssValueKind::Color {
                    rgb,
                    text: text.to_string(),
                },
                span,
            },
            None => Self {
                kind: CssValueKind::Keyword { text: text.to_string() },
                span,
            },
        }
    }

    /// A `#RGB` or `#RRGGBB` literal. `#RGB` expands by doubling each digit
    /// before parsing.
    #[must_use]
    pub fn hex_color(text: &str, span: SourceSpan) -> Self {
        let digits = text.strip_prefix('#').unwrap_or(text);
        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => panic!("malformed color literal '{text}'"),
        };
        let rgb = u32::from_str_radix(&expanded, 16)
            .unwrap_or_else(|_| panic!("malformed color literal '{text}'"));
        Self {
            kind: CssValueKind::Color {
                rgb,
                text: text.to_string(),
            },
            span,
        }
    }

    /// An `rgb(...)` call with the raw argument text.
    #[must_use]
    pub fn rgb(raw: &str, span: SourceSpan) -> Self {
        let mut rgb: u32 = 0;
        for token in raw.split(',') {
            let token = token.trim();
            // rgb() rounds percentages where rgba() truncates them. The
            // divergence matches legacy output bit-for-bit; keep both paths.
            let channel = if let Some(percent) = token.strip_suffix('%') {
                (parse_float(percent) * 255.0 / 100.0).round() as u32
            } else {
                parse_float(token) as u32
            };
            rgb = (rgb << 8) | (channel & 0xff);
        }
        Self {
            kind: CssValueKind::Rgb { rgb, raw: raw.to_string() },
            span,
        }
    }

    /// An `rgba(...)` call. Components are either comma-separated or, in
    /// the modern form, separated by whitespace with the alpha after a `/`.
    #[must_use]
    pub fn rgba(raw: &str, span: SourceSpan) -> Self {
        let tokens: Vec<&str> = if raw.contains(',') {
            raw.split(',').map(str::trim).collect()
        } else {
            raw.split(|c: char| c == '/' || c.is_whitespace())
                .filter(|token| !token.is_empty())
                .collect()
        };

        let mut argb: u32 = 0;
        for (index, token) in tokens.iter().take(4).enumerate() {
            if index == 3 {
                // Alpha is a 0..1 float scaled to a byte and placed ahead of
                // the color channels, in the most significant position.
                let alpha = (parse_float(token) * 255.0) as u32;
                argb |= (alpha & 0xff) << 24;
            } else {
                let channel = if let Some(percent) = token.strip_suffix('%') {
                    (parse_float(percent) * 255.0 / 100.0) as u32
                } else {
                    parse_float(token) as u32
                };
                argb = (argb << 8) | (channel & 0xff);
            }
        }
        Self {
            kind: CssValueKind::Rgba { argb, raw: raw.to_string() },
            span,
        }
    }

    /// A numeric literal. Everything after the signed-real match is kept
    /// verbatim as the unit; units are not validated here.
    #[must_use]
    pub fn number(raw: &str, span: SourceSpan) -> Self {
        let (value, unit) = split_number(raw);
        Self {
            kind: CssValueKind::Number {
                value,
                unit,
                raw: raw.to_string(),
            },
            span,
        }
    }

    /// A quoted string literal, converted per the dialect's escape rules.
    #[must_use]
    pub fn string(raw: &str, span: SourceSpan) -> Self {
        let value = unescape(strip_quotes(raw));
        Self {
            kind: CssValueKind::Str {
                value,
                raw: raw.to_string(),
            },
            span,
        }
    }

    /// A generic `name(...)` call. `rgb`/`rgba` get their typed forms.
    #[must_use]
    pub fn function(name: &str, raw_arguments: &str, span: SourceSpan) -> Self {
        match name {
            "rgb" => Self::rgb(raw_arguments, span),
            "rgba" => Self::rgba(raw_arguments, span),
            _ => Self {
                kind: CssValueKind::FunctionCall {
                    name: name.to_string(),
                    raw_arguments: raw_arguments.to_string(),
                },
                span,
            },
        }
    }

    /// A `url(...)`/`local(...)` source with an optional `format(...)` hint.
    #[must_use]
    pub fn url(name: &str, raw_arguments: &str, format: Option<String>, span: SourceSpan) -> Self {
        Self {
            kind: CssValueKind::Url {
                name: name.to_string(),
                raw_arguments: raw_arguments.to_string(),
                format,
            },
            span,
        }
    }

    /// A comma-separated list of values.
    #[must_use]
    pub fn multi(elements: Vec<CssValue>, span: SourceSpan) -> Self {
        Self {
            kind: CssValueKind::Multi { elements },
            span,
        }
    }

    pub fn is_function_call(&self) -> bool {
        matches!(self.kind, CssValueKind::FunctionCall { .. })
    }

    /// Text content of keyword-like values, used when a property is read as
    /// a plain setting (`fontStyle: normal`, `embedAsCFF: "false"`).
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            CssValueKind::Keyword { text } => Some(text),
            CssValueKind::Color { text, .. } => Some(text),
            CssValueKind::Str { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// The single bare argument of a function call: one matching pair of quotes
/// is stripped when present, otherwise the trimmed text is returned as-is.
#[must_use]
pub fn single_argument(raw_arguments: &str) -> &str {
    strip_quotes(raw_arguments.trim())
}

/// True when the text is wrapped in a matching pair of quotes.
#[must_use]
pub fn is_quoted(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}

/// Strips one matching pair of quotes, when present.
#[must_use]
pub fn strip_quotes(text: &str) -> &str {
    if is_quoted(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn parse_float(text: &str) -> f64 {
    text.trim()
        .parse()
        .unwrap_or_else(|_| panic!("malformed numeric literal '{text}' in color function"))
}

/// Splits a raw numeric literal into the signed-real prefix and the unit
/// text trailing it.
fn split_number(raw: &str) -> (f64, Option<String>) {
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {
                seen_digit = true;
                end += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    assert!(seen_digit, "malformed numeric literal '{raw}'");

    let value = raw[..end]
        .parse()
        .unwrap_or_else(|_| panic!("malformed numeric literal '{raw}'"));
    let unit = &raw[end..];
    (value, (!unit.is_empty()).then(|| unit.to_string()))
}

/// Converts the dialect's escape sequences inside a quote-stripped string.
///
/// A backslash followed by up to six hex digits is a code-point escape,
/// terminated by the first non-hex character. The no-break space and the
/// zero-width space stay in escaped form so they survive later
/// serialization steps; `\\`, `\n`, `\t` and `\r` are left untouched as
/// two-character sequences.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&next) if matches!(next, '\\' | 'n' | 't' | 'r') => {
                out.push('\\');
                out.push(next);
                chars.next();
            }
            Some(&next) if next.is_ascii_hexdigit() => {
                let mut hex = String::new();
                while hex.len() < 6 {
                    match chars.peek() {
                        Some(&digit) if digit.is_ascii_hexdigit() => {
                            hex.push(digit);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                let code_point = u32::from_str_radix(&hex, 16)
                    .unwrap_or_else(|_| panic!("malformed escape '\\{hex}'"));
                match code_point {
                    NO_BREAK_SPACE => out.push_str("\\a0"),
                    ZERO_WIDTH_SPACE => out.push_str("\\200b"),
                    _ => out.push(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER)),
                }
            }
            _ => out.push('\\'),
        }
    }
    out
}

impl Display for CssValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            CssValueKind::Keyword { text } => write!(f, "{}", text),
            CssValueKind::Color { text, .. } => write!(f, "{}", text),
            CssValueKind::Rgb { rgb, .. } => write!(f, "#{:06x}", rgb),
            CssValueKind::Rgba { argb, .. } => write!(f, "#{:08x}", argb),
            CssValueKind::Number { raw, .. } => write!(f, "{}", raw),
            CssValueKind::Str { value, raw } => {
                let quote = raw.chars().next().filter(|c| matches!(*c, '"' | '\'')).unwrap_or('"');
                write!(f, "{}{}{}", quote, value, quote)
            }
            CssValueKind::Multi { elements } => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                Ok(())
            }
            CssValueKind::FunctionCall { name, raw_arguments } => {
                write!(f, "{}({})", name, raw_arguments)
            }
            CssValueKind::Url {
                name,
                raw_arguments,
                format,
            } => {
                write!(f, "{}({})", name, raw_arguments)?;
                if let Some(format) = format {
                    write!(f, " format(\"{}\")", format)?;
                }
                Ok(())
            }
        }
    }
}
