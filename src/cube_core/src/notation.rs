//! Translation between geometric moves and standard face notation.
//!
//! The clockwise sense is fixed here once and shared with the rotation
//! applier: on the positive faces R and F (and their axes' inner layers)
//! a positive angle reads clockwise from outside the face, on U it reads
//! counter-clockwise, and each negative face mirrors its opposite.

use thiserror::Error;

use crate::moves::{Axis, Move};

/// Why a move string failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("no face letter in {0:?}")]
    MissingFace(String),
    #[error("unknown face letter {0:?}")]
    UnknownFace(char),
    #[error("trailing input after the face letter in {0:?}")]
    TrailingInput(String),
    #[error("slice moves only exist on a 3-cube, not a {0}-cube")]
    SliceOnBigCube(usize),
    #[error("a depth prefix cannot apply to the slice move {0}")]
    DepthOnSlice(char),
    #[error("depth {depth} does not reach into a {n}-cube")]
    DepthOutOfRange { depth: usize, n: usize },
}

/// Translate a geometric move into face notation for an `n`-layer cube.
///
/// Total and deterministic: identical `(axis, layer, angle, n)` always
/// yields the identical string, matching the grammar `[digit]<Face>[']`
/// with Face one of `RLUDFBMES`. Outermost layers use bare letters, inner
/// layers a depth prefix counted from the nearest face, and the middle
/// layer of a 3-cube the classical slice letters.
///
/// # Panics
///
/// If `mv.layer()` is outside the cube's grid.
#[must_use]
pub fn notation(mv: Move, n: usize) -> String {
    assert!(
        mv.layer() < n,
        "layer {} out of range for a {n}-cube",
        mv.layer()
    );

    // Classical slice letters: M follows L's sense, E follows D's, S
    // follows F's.
    if n == 3 && mv.layer() == 1 {
        let (letter, clockwise) = match mv.axis() {
            Axis::X => ('M', mv.angle() < 0.0),
            Axis::Y => ('E', mv.angle() > 0.0),
            Axis::Z => ('S', mv.angle() > 0.0),
        };
        return suffixed(letter, clockwise);
    }

    let positive_face = mv.layer() as f32 > (n as f32 - 1.0) / 2.0;

    let letter = match (mv.axis(), positive_face) {
        (Axis::X, true) => 'R',
        (Axis::X, false) => 'L',
        (Axis::Y, true) => 'U',
        (Axis::Y, false) => 'D',
        (Axis::Z, true) => 'F',
        (Axis::Z, false) => 'B',
    };

    // A turn viewed from one face is the mirror of the same physical
    // rotation viewed from the opposite face, so the sense flips with
    // the face.
    let clockwise = if positive_sense(mv.axis(), positive_face) {
        mv.angle() > 0.0
    } else {
        mv.angle() < 0.0
    };

    let depth = if positive_face {
        n - mv.layer()
    } else {
        mv.layer() + 1
    };

    if depth > 1 {
        format!("{depth}{}", suffixed(letter, clockwise))
    } else {
        suffixed(letter, clockwise)
    }
}

/// Whether a positive angle reads clockwise from outside the given face.
fn positive_sense(axis: Axis, positive_face: bool) -> bool {
    match (axis, positive_face) {
        (Axis::X | Axis::Z, true) | (Axis::Y, false) => true,
        (Axis::Y, true) | (Axis::X | Axis::Z, false) => false,
    }
}

fn suffixed(letter: char, clockwise: bool) -> String {
    if clockwise {
        letter.to_string()
    } else {
        format!("{letter}'")
    }
}

/// Parse a single move in face notation back into its geometric form: the
/// inverse of [`notation`]. Accepts an optional depth prefix, a face
/// letter, and an optional trailing `'`.
///
/// # Errors
///
/// When the token is not a legal move on an `n`-cube: an unknown or
/// missing face letter, extra characters, a depth prefix that reaches
/// past the middle of the cube, or a slice letter on a size other
/// than 3.
pub fn parse(token: &str, n: usize) -> Result<Move, NotationError> {
    let mut rest = token;

    let clockwise = if let Some(stripped) = rest.strip_suffix('\'') {
        rest = stripped;
        false
    } else {
        true
    };

    let face_start = rest
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| NotationError::MissingFace(token.to_owned()))?;
    let (digits, face) = rest.split_at(face_start);

    let mut letters = face.chars();
    let letter = letters.next().expect("face_start points at a character");
    if letters.next().is_some() {
        return Err(NotationError::TrailingInput(token.to_owned()));
    }

    if matches!(letter, 'M' | 'E' | 'S') {
        if !digits.is_empty() {
            return Err(NotationError::DepthOnSlice(letter));
        }
        if n != 3 {
            return Err(NotationError::SliceOnBigCube(n));
        }

        let (axis, sense) = match letter {
            'M' => (Axis::X, false),
            'E' => (Axis::Y, true),
            _ => (Axis::Z, true),
        };
        return Ok(directed(axis, 1, clockwise == sense));
    }

    let (axis, positive_face) = match letter {
        'R' => (Axis::X, true),
        'L' => (Axis::X, false),
        'U' => (Axis::Y, true),
        'D' => (Axis::Y, false),
        'F' => (Axis::Z, true),
        'B' => (Axis::Z, false),
        other => return Err(NotationError::UnknownFace(other)),
    };

    let depth: usize = if digits.is_empty() {
        1
    } else {
        digits.parse().unwrap_or(usize::MAX)
    };
    // The near half belongs to each face; the exact middle of an odd cube
    // belongs to the negative faces.
    let max_depth = if positive_face { n / 2 } else { n.div_ceil(2) };
    if depth == 0 || depth > max_depth {
        return Err(NotationError::DepthOutOfRange { depth, n });
    }

    let layer = if positive_face { n - depth } else { depth - 1 };
    Ok(directed(
        axis,
        layer,
        clockwise == positive_sense(axis, positive_face),
    ))
}

/// Parse a whitespace-separated move sequence such as `"R U' 2F"`.
///
/// # Errors
///
/// The first [`NotationError`] encountered, if any token is malformed.
pub fn parse_sequence(sequence: &str, n: usize) -> Result<Vec<Move>, NotationError> {
    sequence
        .split_whitespace()
        .map(|token| parse(token, n))
        .collect()
}

fn directed(axis: Axis, layer: usize, positive: bool) -> Move {
    if positive {
        Move::positive(axis, layer)
    } else {
        Move::negative(axis, layer)
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;

    use super::{NotationError, notation, parse, parse_sequence};
    use crate::moves::{Axis, Move};

    #[test]
    fn outer_faces_use_bare_letters() {
        assert_eq!(notation(Move::positive(Axis::X, 2), 3), "R");
        assert_eq!(notation(Move::negative(Axis::X, 2), 3), "R'");
        assert_eq!(notation(Move::positive(Axis::X, 0), 3), "L'");
        assert_eq!(notation(Move::negative(Axis::X, 0), 3), "L");
        assert_eq!(notation(Move::negative(Axis::Y, 2), 3), "U");
        assert_eq!(notation(Move::positive(Axis::Y, 0), 3), "D");
        assert_eq!(notation(Move::positive(Axis::Z, 2), 3), "F");
        assert_eq!(notation(Move::positive(Axis::Z, 0), 3), "B'");
    }

    #[test]
    fn the_three_cube_middle_uses_slice_letters() {
        assert_eq!(notation(Move::positive(Axis::Y, 1), 3), "E");
        assert_eq!(notation(Move::negative(Axis::Y, 1), 3), "E'");
        assert_eq!(notation(Move::negative(Axis::X, 1), 3), "M");
        assert_eq!(notation(Move::positive(Axis::X, 1), 3), "M'");
        assert_eq!(notation(Move::positive(Axis::Z, 1), 3), "S");
        assert_eq!(notation(Move::negative(Axis::Z, 1), 3), "S'");
    }

    #[test]
    fn inner_layers_count_from_the_nearest_face() {
        assert_eq!(notation(Move::positive(Axis::X, 3), 5), "2R");
        assert_eq!(notation(Move::positive(Axis::X, 1), 5), "2L'");
        assert_eq!(notation(Move::negative(Axis::X, 2), 5), "3L");
        assert_eq!(notation(Move::negative(Axis::Y, 5), 7), "2U");
        assert_eq!(notation(Move::positive(Axis::Z, 4), 7), "3F");
        assert_eq!(notation(Move::positive(Axis::Z, 2), 7), "3B'");
    }

    #[test]
    fn output_always_matches_the_grammar() {
        for (n, axis, layer, positive) in
            iproduct!(3..=7_usize, Axis::ALL, 0..7_usize, [true, false])
        {
            if layer >= n {
                continue;
            }
            let mv = if positive {
                Move::positive(axis, layer)
            } else {
                Move::negative(axis, layer)
            };

            let text = notation(mv, n);
            let mut chars = text.chars().peekable();
            if chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
            assert!(
                chars
                    .next()
                    .is_some_and(|c| "RLUDFBMES".contains(c)),
                "bad notation {text:?}"
            );
            match chars.next() {
                None => {}
                Some('\'') => assert_eq!(chars.next(), None, "bad notation {text:?}"),
                Some(_) => panic!("bad notation {text:?}"),
            }
        }
    }

    #[test]
    fn parse_inverts_notation() {
        for (n, axis, layer, positive) in
            iproduct!(3..=7_usize, Axis::ALL, 0..7_usize, [true, false])
        {
            if layer >= n {
                continue;
            }
            let mv = if positive {
                Move::positive(axis, layer)
            } else {
                Move::negative(axis, layer)
            };

            assert_eq!(parse(&notation(mv, n), n), Ok(mv));
        }
    }

    #[test]
    fn parse_sequences() {
        let moves = parse_sequence("R U' 2F", 5).unwrap();
        assert_eq!(
            moves,
            [
                Move::positive(Axis::X, 4),
                Move::positive(Axis::Y, 4),
                Move::positive(Axis::Z, 3),
            ]
        );
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        assert_eq!(parse("", 3), Err(NotationError::MissingFace(String::new())));
        assert_eq!(parse("12", 3), Err(NotationError::MissingFace("12".into())));
        assert_eq!(parse("Q", 3), Err(NotationError::UnknownFace('Q')));
        assert_eq!(
            parse("Rw", 3),
            Err(NotationError::TrailingInput("Rw".into()))
        );
        assert_eq!(parse("M", 5), Err(NotationError::SliceOnBigCube(5)));
        assert_eq!(parse("2E", 3), Err(NotationError::DepthOnSlice('E')));
        assert_eq!(
            parse("4R", 5),
            Err(NotationError::DepthOutOfRange { depth: 4, n: 5 })
        );
        assert_eq!(
            parse("0L", 5),
            Err(NotationError::DepthOutOfRange { depth: 0, n: 5 })
        );
    }
}
