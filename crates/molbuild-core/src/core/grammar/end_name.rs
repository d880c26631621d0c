use super::{GrammarError, SideToken};
use phf::phf_set;

/// Terminal substituents: each ends growth along its branch.
static X_GROUP: phf::Set<char> = phf_set! {
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L',
};

/// Chain-extending substituents, paired with the X-group alphabet.
static R_GROUP: phf::Set<char> = phf_set! {
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l',
};

/// Ring units that take no R-group suffix.
static ARYL0: phf::Set<char> = phf_set! { '2', '3', '8', '9' };

/// Ring units that expect a pair of trailing R-group letters.
static ARYL2: phf::Set<char> = phf_set! { '4', '5', '6', '7' };

/// The R-group letter synthesized when an aryl2 ring's pair is missing.
const DEFAULT_R_GROUP: char = 'a';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    XGroup,
    RGroup,
    Aryl0,
    Aryl2,
}

fn classify(c: char) -> Option<CharClass> {
    if X_GROUP.contains(&c) {
        Some(CharClass::XGroup)
    } else if R_GROUP.contains(&c) {
        Some(CharClass::RGroup)
    } else if ARYL0.contains(&c) {
        Some(CharClass::Aryl0)
    } else if ARYL2.contains(&c) {
        Some(CharClass::Aryl2)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Initial state; also re-entered after an aryl2 ring's R pair closes.
    Start,
    /// After a ring that takes no R-groups; any non-R character may follow.
    Aryl0,
    /// After a ring expecting two R-group letters; `seen` counts how many
    /// of the pair have been consumed so far.
    Aryl2 { seen: u8 },
    /// After a terminal X-group; remaining characters are ignored.
    End,
}

/// Tokenizes one side's descriptor into an ordered attachment list.
///
/// Each emitted token records the index of the token it attaches to: ring
/// and terminal tokens chain linearly, while R-group tokens attach to the
/// most recent ring without advancing the chain. An aryl2 ring missing one
/// or both of its R-group letters has the absent partner(s) synthesized by
/// duplication — of the lone letter when one was given, or of the default
/// `a` when the descriptor ends (or continues with a ring/terminal) before
/// any letter arrives.
///
/// # Errors
///
/// `InvalidCharacter` for any character outside the four alphabets;
/// `MisplacedRGroup` for an R-group letter in a position where only ring or
/// terminal characters are grammatical.
pub fn parse_end_name(name: &str) -> Result<Vec<SideToken>, GrammarError> {
    let chars: Vec<char> = name.chars().collect();
    for &c in &chars {
        if classify(c).is_none() {
            return Err(GrammarError::InvalidCharacter(c));
        }
    }

    let mut parts: Vec<SideToken> = Vec::new();
    // -1 marks attachment to the core itself.
    let mut last_connect: i32 = -1;
    let mut state = State::Start;

    for (i, &c) in chars.iter().enumerate() {
        let class = classify(c).expect("validated above");
        match state {
            State::Start | State::Aryl0 => {
                if class == CharClass::RGroup {
                    return Err(GrammarError::MisplacedRGroup(c));
                }
                parts.push(SideToken::new(c, last_connect));
                last_connect = parts.len() as i32 - 1;
                state = advance(class);
            }
            State::Aryl2 { seen } => match class {
                CharClass::RGroup if seen == 0 => {
                    let next_is_r = chars
                        .get(i + 1)
                        .is_some_and(|&n| classify(n) == Some(CharClass::RGroup));
                    parts.push(SideToken::new(c, last_connect));
                    if next_is_r {
                        state = State::Aryl2 { seen: 1 };
                    } else {
                        // Lone letter: duplicate it to complete the pair.
                        parts.push(SideToken::new(c, last_connect));
                        state = State::Start;
                    }
                }
                CharClass::RGroup => {
                    parts.push(SideToken::new(c, last_connect));
                    state = State::Start;
                }
                _ => {
                    // No letters at all: synthesize the default pair, then
                    // treat this character as a fresh chain element.
                    parts.push(SideToken::new(DEFAULT_R_GROUP, last_connect));
                    parts.push(SideToken::new(DEFAULT_R_GROUP, last_connect));
                    parts.push(SideToken::new(c, last_connect));
                    last_connect = parts.len() as i32 - 1;
                    state = advance(class);
                }
            },
            State::End => {}
        }
    }

    // End of input inside an unfinished aryl2 pair: same default synthesis
    // as mid-string, scoped deliberately to this one state.
    if let State::Aryl2 { .. } = state {
        parts.push(SideToken::new(DEFAULT_R_GROUP, last_connect));
        parts.push(SideToken::new(DEFAULT_R_GROUP, last_connect));
    }

    Ok(parts)
}

fn advance(class: CharClass) -> State {
    match class {
        CharClass::XGroup => State::End,
        CharClass::Aryl0 => State::Aryl0,
        CharClass::Aryl2 => State::Aryl2 { seen: 0 },
        CharClass::RGroup => unreachable!("R-group characters never advance the chain"),
    }
}
