//! Literal colour validation.
//!
//! Literal shade values are checked, never rewritten: the string a caller
//! supplies is the string the descriptor emits. Validation runs the value
//! through `cssparser`'s tokenizer and accepts exactly one of:
//!
//! - a hex colour with 3, 4, 6 or 8 digits (`#fff`, `#3b82f6`, `#3b82f680`)
//! - a colour function (`rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`,
//!   `lab()`, `lch()`, `oklab()`, `oklch()`, `color()`)
//! - a keyword (`transparent`, `currentColor`, `white`, ...)

use cssparser::{ParseError, Parser, ParserInput, Token};

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
];

/// Checks that `value` is a single CSS colour literal.
///
/// Returns a short description of the problem on failure.
pub fn validate_literal(value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color value".to_string());
    }

    if trimmed.contains('(') && !trimmed.ends_with(')') {
        return Err("unclosed color function".to_string());
    }

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    parse_color_token(&mut parser).map_err(|_| describe(trimmed))?;

    if parser.expect_exhausted().is_err() {
        return Err("unexpected trailing tokens".to_string());
    }
    Ok(())
}

fn describe(value: &str) -> String {
    if let Some(hex) = value.strip_prefix('#') {
        return format!("hex color must have 3, 4, 6 or 8 hex digits, got '{}'", hex);
    }
    if let Some((name, _)) = value.split_once('(') {
        if !COLOR_FUNCTIONS.contains(&name.trim().to_ascii_lowercase().as_str()) {
            return format!("unknown color function '{}'", name.trim());
        }
        return "malformed color function arguments".to_string();
    }
    "not a color literal".to_string()
}

fn parse_color_token<'i>(parser: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    let token = parser.next()?.clone();
    match token {
        Token::Hash(ref digits) | Token::IDHash(ref digits) => {
            if is_hex_color(digits) {
                Ok(())
            } else {
                Err(parser.new_custom_error::<(), ()>(()))
            }
        }
        Token::Ident(_) => Ok(()),
        Token::Function(ref name) => {
            let name = name.to_ascii_lowercase();
            if !COLOR_FUNCTIONS.contains(&name.as_str()) {
                return Err(parser.new_custom_error::<(), ()>(()));
            }
            parser.parse_nested_block(|args| {
                if args.is_exhausted() {
                    return Err(args.new_custom_error::<(), ()>(()));
                }
                while !args.is_exhausted() {
                    let bad = matches!(args.next()?, Token::BadString(_) | Token::BadUrl(_));
                    if bad {
                        return Err(args.new_custom_error::<(), ()>(()));
                    }
                }
                Ok(())
            })
        }
        _ => Err(parser.new_custom_error::<(), ()>(())),
    }
}

fn is_hex_color(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}
