//! Property parsing: declaration text → typed property values.
//!
//! Values are lexed by [`crate::css::tokenizer`], grouped into [`Value`]s and
//! then applied to the typed fields of a [`Style`].

use crate::css::scalar::{Scalar, Unit};
use crate::css::styles::*;
use crate::css::tokenizer::{tokenize, Token};

/// Errors from property parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

/// A single lexed declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A unitless number: `9`, `-2.5`.
    Number(f32),
    /// A number with a unit suffix: `50%`, `12px`, `12p`.
    Dimension(f32, String),
    /// A bare identifier.
    Ident(String),
    /// A quoted string with the quotes removed.
    Str(String),
    /// An `RGBA(r,g,b[,a])` colour literal.
    Rgba(Color),
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

/// Lex raw declaration text into values.
pub fn parse_values(property: &str, raw: &str) -> Result<Vec<Value>, PropertyError> {
    let tokens = tokenize(raw);
    let mut values = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some((token, text)) = iter.next() {
        let value = match token {
            Token::Number => Value::Number(parse_number(property, &text)?),
            Token::Dimension => {
                let split = text
                    .find(|c: char| c == '%' || c == 'p')
                    .unwrap_or(text.len());
                let (number, unit) = text.split_at(split);
                Value::Dimension(parse_number(property, number)?, unit.to_owned())
            }
            Token::StringLiteral | Token::StringLiteralSingle => {
                Value::Str(text[1..text.len() - 1].to_owned())
            }
            Token::Ident if matches!(iter.peek(), Some((Token::ParenOpen, _))) => {
                if !text.eq_ignore_ascii_case("rgba") {
                    return Err(invalid(property, format!("unknown function: {text}")));
                }
                iter.next();
                let mut channels = Vec::new();
                loop {
                    match iter.next() {
                        Some((Token::Number, n)) => channels.push(n),
                        Some((Token::Comma, _)) => {}
                        Some((Token::ParenClose, _)) => break,
                        Some((_, other)) => {
                            return Err(invalid(
                                property,
                                format!("unexpected '{other}' in RGBA()"),
                            ))
                        }
                        None => return Err(invalid(property, "unterminated RGBA()")),
                    }
                }
                Value::Rgba(parse_rgba(property, &channels)?)
            }
            Token::Ident => Value::Ident(text),
            Token::ParenOpen | Token::ParenClose | Token::Comma => {
                return Err(invalid(property, format!("unexpected '{text}'")));
            }
        };
        values.push(value);
    }

    Ok(values)
}

fn parse_number(property: &str, text: &str) -> Result<f32, PropertyError> {
    text.parse::<f32>()
        .map_err(|_| invalid(property, format!("invalid number: {text}")))
}

/// Build a colour from 3 or 4 integer channels; alpha defaults to 255.
fn parse_rgba(property: &str, channels: &[String]) -> Result<Color, PropertyError> {
    if !(3..=4).contains(&channels.len()) {
        return Err(invalid(
            property,
            format!("RGBA() expects 3 or 4 channels, got {}", channels.len()),
        ));
    }
    let mut out = [255u8; 4];
    for (slot, text) in out.iter_mut().zip(channels) {
        *slot = text
            .parse::<u8>()
            .map_err(|_| invalid(property, format!("channel out of range 0-255: {text}")))?;
    }
    Ok(Color::rgba(out[0], out[1], out[2], out[3]))
}

/// Parse a `left`/`top` value: a length or an alignment keyword.
pub fn parse_position(property: &str, value: &Value) -> Result<Scalar, PropertyError> {
    match value {
        Value::Ident(name) => match name.to_ascii_lowercase().as_str() {
            "left" | "top" => Ok(Scalar::px(0.0)),
            "right" | "bottom" => Ok(Scalar::far()),
            "center" | "centre" | "middle" => Ok(Scalar::center()),
            other => Err(invalid(property, format!("unknown alignment: {other}"))),
        },
        other => parse_length(property, other),
    }
}

/// Parse a `width`/`height` value: pixels or percent only.
pub fn parse_length(property: &str, value: &Value) -> Result<Scalar, PropertyError> {
    match value {
        Value::Number(n) => Ok(Scalar::px(*n)),
        Value::Dimension(n, unit) => match unit.as_str() {
            "%" => Ok(Scalar::percent(*n)),
            "px" | "p" => Ok(Scalar::px(*n)),
            other => Err(invalid(property, format!("unknown unit: {other}"))),
        },
        other => Err(invalid(
            property,
            format!("expected number or dimension, got: {other:?}"),
        )),
    }
}

fn parse_width(property: &str, value: &Value) -> Result<f32, PropertyError> {
    match parse_length(property, value)? {
        Scalar {
            value,
            unit: Unit::Pixel,
        } if value >= 0.0 => Ok(value),
        other => Err(invalid(property, format!("expected pixel width, got {other}"))),
    }
}

fn require_single<'a>(values: &'a [Value], property: &str) -> Result<&'a Value, PropertyError> {
    match values {
        [value] => Ok(value),
        _ => Err(invalid(
            property,
            format!("expected 1 value, got {}", values.len()),
        )),
    }
}

fn require_colour(values: &[Value], property: &str) -> Result<Color, PropertyError> {
    match require_single(values, property)? {
        Value::Rgba(c) => Ok(*c),
        other => Err(invalid(property, format!("expected RGBA(...), got: {other:?}"))),
    }
}

fn require_ident(values: &[Value], property: &str) -> Result<String, PropertyError> {
    match require_single(values, property)? {
        Value::Ident(name) => Ok(name.to_ascii_lowercase()),
        other => Err(invalid(property, format!("expected identifier, got: {other:?}"))),
    }
}

fn parse_background(values: &[Value], property: &str) -> Result<Background, PropertyError> {
    match require_single(values, property)? {
        Value::Ident(name)
            if name.eq_ignore_ascii_case("transparent") || name.eq_ignore_ascii_case("none") =>
        {
            Ok(Background::Transparent)
        }
        Value::Rgba(c) => Ok(Background::Colour(*c)),
        Value::Ident(name) | Value::Str(name) => Ok(Background::Sprite(name.clone())),
        other => Err(invalid(property, format!("expected colour or sprite, got: {other:?}"))),
    }
}

/// Apply one `key: value` declaration to a [`Style`].
///
/// `property` must already be lowercased. Every property written here is
/// marked as set. Returns an error for unknown properties or invalid values;
/// on error the style is left untouched.
pub fn apply_declaration(
    style: &mut Style,
    property: &str,
    raw: &str,
) -> Result<(), PropertyError> {
    let values = parse_values(property, raw)?;

    match property {
        // Geometry
        "left" => style.left.set(parse_position(property, require_single(&values, property)?)?),
        "top" => style.top.set(parse_position(property, require_single(&values, property)?)?),
        "width" => style.width.set(parse_length(property, require_single(&values, property)?)?),
        "height" => style.height.set(parse_length(property, require_single(&values, property)?)?),

        // Text
        "text-align" => {
            let name = require_ident(&values, property)?;
            style.text_align.set(match name.as_str() {
                "left" => HorizontalAlign::Left,
                "center" | "centre" => HorizontalAlign::Center,
                "right" => HorizontalAlign::Right,
                other => {
                    return Err(invalid(property, format!("expected left|center|right, got: {other}")))
                }
            });
        }
        "vertical-align" => {
            let name = require_ident(&values, property)?;
            style.vertical_align.set(match name.as_str() {
                "top" => VerticalAlign::Top,
                "middle" | "center" | "centre" => VerticalAlign::Middle,
                "bottom" => VerticalAlign::Bottom,
                other => {
                    return Err(invalid(property, format!("expected top|middle|bottom, got: {other}")))
                }
            });
        }
        "font" => match require_single(&values, property)? {
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => style.font.set(*n as u32),
            other => return Err(invalid(property, format!("expected font id, got: {other:?}"))),
        },
        "colour" | "color" => style.colour.set(require_colour(&values, property)?),

        // Box
        "background" => style.background.set(parse_background(&values, property)?),
        "background-image" => {
            let sprite = match require_single(&values, property)? {
                Value::Ident(name) if name.eq_ignore_ascii_case("none") => Background::Transparent,
                Value::Ident(name) | Value::Str(name) => Background::Sprite(name.clone()),
                other => return Err(invalid(property, format!("expected sprite name, got: {other:?}"))),
            };
            style.background.set(sprite);
        }
        "background-colour" | "background-color" => {
            let colour = require_colour(&values, property)?;
            style.background.set(Background::Colour(colour));
        }
        "border" => match values.as_slice() {
            [width] => style.border_width.set(parse_width(property, width)?),
            [width, Value::Rgba(colour)] => {
                let width = parse_width(property, width)?;
                style.border_width.set(width);
                style.border_top.set(*colour);
                style.border_right.set(*colour);
                style.border_bottom.set(*colour);
                style.border_left.set(*colour);
            }
            _ => return Err(invalid(property, "expected <width> [RGBA(...)]")),
        },
        "border-width" => style
            .border_width
            .set(parse_width(property, require_single(&values, property)?)?),
        "border-top" => style.border_top.set(require_colour(&values, property)?),
        "border-right" => style.border_right.set(require_colour(&values, property)?),
        "border-bottom" => style.border_bottom.set(require_colour(&values, property)?),
        "border-left" => style.border_left.set(require_colour(&values, property)?),

        other => return Err(PropertyError::UnknownProperty(other.to_string())),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(property: &str, value: &str) -> Result<Style, PropertyError> {
        let mut style = Style::new();
        apply_declaration(&mut style, property, value)?;
        Ok(style)
    }

    // ── values ───────────────────────────────────────────────────────

    #[test]
    fn parse_values_mixed() {
        let values = parse_values("x", "2 RGBA(1,2,3) 50% 'a b'").unwrap();
        assert_eq!(
            values,
            vec![
                Value::Number(2.0),
                Value::Rgba(Color::rgba(1, 2, 3, 255)),
                Value::Dimension(50.0, "%".into()),
                Value::Str("a b".into()),
            ]
        );
    }

    #[test]
    fn rgba_is_case_insensitive() {
        let values = parse_values("x", "rgba(4, 5, 6, 7)").unwrap();
        assert_eq!(values, vec![Value::Rgba(Color::rgba(4, 5, 6, 7))]);
    }

    #[test]
    fn rgba_channel_out_of_range_err() {
        assert!(parse_values("x", "RGBA(256,0,0)").is_err());
    }

    #[test]
    fn rgba_wrong_arity_err() {
        assert!(parse_values("x", "RGBA(1,2)").is_err());
        assert!(parse_values("x", "RGBA(1,2,3,4,5)").is_err());
    }

    #[test]
    fn rgba_unterminated_err() {
        assert!(parse_values("x", "RGBA(1,2,3").is_err());
    }

    // ── geometry ─────────────────────────────────────────────────────

    #[test]
    fn apply_left_pixels() {
        let s = apply("left", "12px").unwrap();
        assert_eq!(*s.left.get(), Scalar::px(12.0));
        assert!(s.left.is_set());
    }

    #[test]
    fn apply_left_short_pixel_suffix_and_bare() {
        assert_eq!(*apply("left", "7p").unwrap().left.get(), Scalar::px(7.0));
        assert_eq!(*apply("left", "7").unwrap().left.get(), Scalar::px(7.0));
    }

    #[test]
    fn apply_width_percent() {
        let s = apply("width", "50%").unwrap();
        assert_eq!(s.width.get().unit, Unit::Percent);
        assert_eq!(s.width.get().value, 0.5);
    }

    #[test]
    fn apply_position_keywords() {
        assert_eq!(*apply("left", "right").unwrap().left.get(), Scalar::far());
        assert_eq!(*apply("top", "bottom").unwrap().top.get(), Scalar::far());
        assert_eq!(*apply("left", "centre").unwrap().left.get(), Scalar::center());
        assert_eq!(*apply("top", "middle").unwrap().top.get(), Scalar::center());
        assert_eq!(*apply("top", "top").unwrap().top.get(), Scalar::px(0.0));
    }

    #[test]
    fn apply_width_rejects_alignment() {
        assert!(matches!(
            apply("width", "right"),
            Err(PropertyError::InvalidValue { .. })
        ));
    }

    #[test]
    fn apply_width_multiple_values_err() {
        assert!(apply("width", "10 20").is_err());
    }

    // ── text ─────────────────────────────────────────────────────────

    #[test]
    fn apply_text_align() {
        let s = apply("text-align", "Center").unwrap();
        assert_eq!(*s.text_align.get(), HorizontalAlign::Center);
        let s = apply("vertical-align", "bottom").unwrap();
        assert_eq!(*s.vertical_align.get(), VerticalAlign::Bottom);
    }

    #[test]
    fn apply_font() {
        assert_eq!(*apply("font", "9").unwrap().font.get(), 9);
        assert!(apply("font", "9.5").is_err());
        assert!(apply("font", "big").is_err());
    }

    #[test]
    fn apply_colour_both_spellings() {
        let a = apply("colour", "RGBA(1,2,3,4)").unwrap();
        let b = apply("color", "RGBA(1,2,3,4)").unwrap();
        assert_eq!(a, b);
        assert_eq!(*a.colour.get(), Color::rgba(1, 2, 3, 4));
    }

    // ── box ──────────────────────────────────────────────────────────

    #[test]
    fn apply_background_variants() {
        assert_eq!(
            *apply("background", "transparent").unwrap().background.get(),
            Background::Transparent
        );
        assert!(apply("background", "none").unwrap().background.is_set());
        assert_eq!(
            *apply("background", "RGBA(9,9,9)").unwrap().background.get(),
            Background::Colour(Color::rgb(9, 9, 9))
        );
        assert_eq!(
            *apply("background", "ui/panel.png").unwrap().background.get(),
            Background::Sprite("ui/panel.png".into())
        );
    }

    #[test]
    fn apply_background_image_and_colour() {
        assert_eq!(
            *apply("background-image", "\"button up\"").unwrap().background.get(),
            Background::Sprite("button up".into())
        );
        assert_eq!(
            *apply("background-colour", "RGBA(128,70,27,255)")
                .unwrap()
                .background
                .get(),
            Background::Colour(Color::rgb(128, 70, 27))
        );
        assert!(apply("background-color", "RGBA(1,1,1)").is_ok());
    }

    #[test]
    fn apply_border_width_only() {
        let s = apply("border", "2").unwrap();
        assert_eq!(*s.border_width.get(), 2.0);
        assert!(!s.border_top.is_set());
    }

    #[test]
    fn apply_border_width_and_colour() {
        let s = apply("border", "2px RGBA(10,20,30)").unwrap();
        assert_eq!(*s.border_width.get(), 2.0);
        assert_eq!(s.border_colours(), [Color::rgb(10, 20, 30); 4]);
        assert!(s.border_left.is_set());
    }

    #[test]
    fn apply_border_edges() {
        let s = apply("border-left", "RGBA(1,0,0)").unwrap();
        assert_eq!(*s.border_left.get(), Color::rgb(1, 0, 0));
        assert!(!s.border_right.is_set());
        assert_eq!(*apply("border-width", "3").unwrap().border_width.get(), 3.0);
    }

    #[test]
    fn apply_border_invalid() {
        assert!(apply("border", "RGBA(1,2,3)").is_err());
        assert!(apply("border", "-1").is_err());
        assert!(apply("border", "50%").is_err());
    }

    // ── errors ───────────────────────────────────────────────────────

    #[test]
    fn apply_unknown_property() {
        assert_eq!(
            apply("opacity", "1"),
            Err(PropertyError::UnknownProperty("opacity".into()))
        );
    }

    #[test]
    fn failed_apply_leaves_style_untouched() {
        let mut style = Style::new();
        let _ = apply_declaration(&mut style, "border", "2 banana");
        assert!(style.is_empty());
    }
}
