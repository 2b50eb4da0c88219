//! Scripted keyboard input for headless runs.
//!
//! Each non-blank line reads `<frames> [keys]`. Keys are `N`, `S`, `W`, `E`
//! for held directions and `A` (attack), `+` (speed up), `-` (slow down),
//! `Q` (quit) for presses, which fire on the first frame of the span only.
//! `#` starts a comment.

use shadow_dimension_system_controls::FrameInput;
use thiserror::Error;

const COMMENT: char = '#';

/// Parsed sequence of input spans.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InputScript {
    spans: Vec<Span>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    frames: u32,
    input: FrameInput,
}

impl InputScript {
    /// Parses a script from its textual representation.
    pub(crate) fn parse(text: &str) -> Result<Self, ScriptError> {
        let mut spans = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split(COMMENT).next().unwrap_or_default().trim();
            if content.is_empty() {
                continue;
            }

            let mut fields = content.split_whitespace();
            let count = fields.next().ok_or(ScriptError::MissingFrameCount { line })?;
            let frames = count
                .parse::<u32>()
                .map_err(|_| ScriptError::InvalidFrameCount {
                    line,
                    value: count.to_owned(),
                })?;

            let mut input = FrameInput::default();
            for key in fields.flat_map(str::chars) {
                apply_key(&mut input, key).ok_or(ScriptError::UnknownKey { line, key })?;
            }

            spans.push(Span { frames, input });
        }

        Ok(Self { spans })
    }

    /// Expands the script into one input per frame.
    pub(crate) fn frames(&self) -> impl Iterator<Item = FrameInput> + '_ {
        self.spans.iter().flat_map(|span| {
            let held = FrameInput {
                north: span.input.north,
                south: span.input.south,
                west: span.input.west,
                east: span.input.east,
                ..FrameInput::default()
            };
            (0..span.frames).map(move |frame| if frame == 0 { span.input } else { held })
        })
    }
}

fn apply_key(input: &mut FrameInput, key: char) -> Option<()> {
    let flag = match key.to_ascii_uppercase() {
        'N' => &mut input.north,
        'S' => &mut input.south,
        'W' => &mut input.west,
        'E' => &mut input.east,
        'A' => &mut input.attack,
        '+' => &mut input.speed_up,
        '-' => &mut input.slow_down,
        'Q' => &mut input.quit,
        _ => return None,
    };
    *flag = true;
    Some(())
}

/// Errors that can occur while parsing an input script.
#[derive(Debug, Error, PartialEq)]
pub(crate) enum ScriptError {
    /// A line held keys but no frame count.
    #[error("line {line}: missing frame count")]
    MissingFrameCount {
        /// One-based line number.
        line: usize,
    },
    /// The frame count is not a non-negative integer.
    #[error("line {line}: invalid frame count '{value}'")]
    InvalidFrameCount {
        /// One-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },
    /// A key outside the supported set was used.
    #[error("line {line}: unknown key '{key}'")]
    UnknownKey {
        /// One-based line number.
        line: usize,
        /// Offending key.
        key: char,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_fire_once_and_holds_persist() {
        let script = InputScript::parse("# opening\n3 EA\n\n1 +\n").expect("script parses");
        let frames: Vec<_> = script.frames().collect();

        assert_eq!(frames.len(), 4);
        assert!(frames[0].attack && frames[0].east);
        assert!(!frames[1].attack && frames[1].east);
        assert!(!frames[2].attack && frames[2].east);
        assert!(frames[3].speed_up && !frames[3].east);
    }

    #[test]
    fn bare_count_is_an_idle_span() {
        let script = InputScript::parse("2   # wait").expect("script parses");
        assert_eq!(
            script.frames().collect::<Vec<_>>(),
            vec![FrameInput::default(); 2]
        );
    }

    #[test]
    fn lowercase_keys_and_split_groups_are_accepted() {
        let script = InputScript::parse("1 n w -").expect("script parses");
        let frame = script.frames().next().expect("one frame");
        assert!(frame.north && frame.west && frame.slow_down);
    }

    #[test]
    fn malformed_lines_are_reported() {
        assert_eq!(
            InputScript::parse("x E"),
            Err(ScriptError::InvalidFrameCount {
                line: 1,
                value: "x".to_owned(),
            })
        );
        assert_eq!(
            InputScript::parse("1 E\n2 Z"),
            Err(ScriptError::UnknownKey { line: 2, key: 'Z' })
        );
    }
}
