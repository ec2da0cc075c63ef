//! Letter identities.
//!
//! A [`Symbol`] packs a base letter, its case, a structural modifier
//! (circumflex, horn or breve) and a tone into one `u16`. Modifier and tone
//! are independent axes; every operation is total and returns the input
//! unchanged when the letter class does not admit the requested change.

use core::fmt;

/// Latin base letters. `đ` is its own base, a consonant without modifier or
/// tone axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Letter {
    A,
    B,
    C,
    D,
    DStroke,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

const LETTERS: [Letter; 27] = [
    Letter::A,
    Letter::B,
    Letter::C,
    Letter::D,
    Letter::DStroke,
    Letter::E,
    Letter::F,
    Letter::G,
    Letter::H,
    Letter::I,
    Letter::J,
    Letter::K,
    Letter::L,
    Letter::M,
    Letter::N,
    Letter::O,
    Letter::P,
    Letter::Q,
    Letter::R,
    Letter::S,
    Letter::T,
    Letter::U,
    Letter::V,
    Letter::W,
    Letter::X,
    Letter::Y,
    Letter::Z,
];

// `đ` renders through its own branch; the slot here keeps indices aligned.
const ASCII: &[u8; 27] = b"abcddefghijklmnopqrstuvwxyz";

/// What a base letter admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LetterClass {
    pub vowel: bool,
    pub circumflex: bool,
    pub horn: bool,
    pub breve: bool,
    /// Part of the Vietnamese alphabet (`f`, `j`, `w`, `z` are not).
    pub native: bool,
}

const fn vowel(circumflex: bool, horn: bool, breve: bool) -> LetterClass {
    LetterClass {
        vowel: true,
        circumflex,
        horn,
        breve,
        native: true,
    }
}

const CONSONANT: LetterClass = LetterClass {
    vowel: false,
    circumflex: false,
    horn: false,
    breve: false,
    native: true,
};

const FOREIGN: LetterClass = LetterClass {
    native: false,
    ..CONSONANT
};

const LETTER_CLASSES: [LetterClass; 27] = [
    vowel(true, false, true), // a
    CONSONANT,                // b
    CONSONANT,                // c
    CONSONANT,                // d
    CONSONANT,                // đ
    vowel(true, false, false), // e
    FOREIGN,                  // f
    CONSONANT,                // g
    CONSONANT,                // h
    vowel(false, false, false), // i
    FOREIGN,                  // j
    CONSONANT,                // k
    CONSONANT,                // l
    CONSONANT,                // m
    CONSONANT,                // n
    vowel(true, true, false), // o
    CONSONANT,                // p
    CONSONANT,                // q
    CONSONANT,                // r
    CONSONANT,                // s
    CONSONANT,                // t
    vowel(false, true, false), // u
    CONSONANT,                // v
    FOREIGN,                  // w
    CONSONANT,                // x
    vowel(false, false, false), // y
    FOREIGN,                  // z
];

impl Letter {
    pub const fn from_index(index: u8) -> Option<Letter> {
        if (index as usize) < LETTERS.len() {
            Some(LETTERS[index as usize])
        } else {
            None
        }
    }

    /// Maps an ASCII letter of either case; `d` maps to [`Letter::D`].
    pub const fn from_ascii(b: u8) -> Option<Letter> {
        let lower = b.to_ascii_lowercase();
        if !lower.is_ascii_lowercase() {
            return None;
        }
        let index = lower - b'a';
        // every letter after `d` sits one slot later because of `đ`
        let index = if index >= 4 { index + 1 } else { index };
        Some(LETTERS[index as usize])
    }

    #[inline(always)]
    pub const fn class(self) -> LetterClass {
        LETTER_CLASSES[self as usize]
    }

    #[inline(always)]
    pub const fn is_vowel(self) -> bool {
        self.class().vowel
    }

    pub const fn ascii(self) -> u8 {
        ASCII[self as usize]
    }
}

impl LetterClass {
    pub const fn admits(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::None => true,
            Modifier::Circumflex => self.circumflex,
            Modifier::Horn => self.horn,
            Modifier::Breve => self.breve,
        }
    }
}

/// Structural diacritic. At most one per letter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Modifier {
    #[default]
    None = 0,
    /// â ê ô
    Circumflex = 1,
    /// ơ ư
    Horn = 2,
    /// ă
    Breve = 3,
}

impl Modifier {
    const fn from_bits(bits: u16) -> Modifier {
        match bits {
            1 => Modifier::Circumflex,
            2 => Modifier::Horn,
            3 => Modifier::Breve,
            _ => Modifier::None,
        }
    }
}

/// Tone mark, numbered the way Telex and VNI number them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tone {
    #[default]
    None = 0,
    Acute = 1,
    Grave = 2,
    Hook = 3,
    Tilde = 4,
    Dot = 5,
}

const TONES: [Tone; 6] = [
    Tone::None,
    Tone::Acute,
    Tone::Grave,
    Tone::Hook,
    Tone::Tilde,
    Tone::Dot,
];

impl Tone {
    pub const ALL: [Tone; 6] = TONES;

    pub const fn from_index(index: u8) -> Option<Tone> {
        if (index as usize) < TONES.len() {
            Some(TONES[index as usize])
        } else {
            None
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

const LETTER_MASK: u16 = 0x1F;
const MODIFIER_SHIFT: u16 = 5;
const MODIFIER_MASK: u16 = 0x3 << MODIFIER_SHIFT;
const TONE_SHIFT: u16 = 7;
const TONE_MASK: u16 = 0x7 << TONE_SHIFT;
const UPPER_BIT: u16 = 1 << 10;

/// One Vietnamese letter occurrence.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u16);

impl Symbol {
    /// Lowercase, unmodified, toneless.
    pub const fn new(letter: Letter) -> Symbol {
        Symbol(letter as u16)
    }

    #[inline(always)]
    pub const fn ordinal(self) -> u16 {
        self.0
    }

    #[inline(always)]
    pub const fn letter(self) -> Letter {
        LETTERS[(self.0 & LETTER_MASK) as usize]
    }

    #[inline(always)]
    pub const fn modifier(self) -> Modifier {
        Modifier::from_bits((self.0 & MODIFIER_MASK) >> MODIFIER_SHIFT)
    }

    #[inline(always)]
    pub const fn tone(self) -> Tone {
        TONES[((self.0 & TONE_MASK) >> TONE_SHIFT) as usize]
    }

    #[inline(always)]
    pub const fn is_upper(self) -> bool {
        self.0 & UPPER_BIT != 0
    }

    #[inline(always)]
    pub const fn is_vowel(self) -> bool {
        self.letter().is_vowel()
    }

    /// `Modifier::None` removes the current modifier.
    pub const fn with_modifier(self, modifier: Modifier) -> Symbol {
        if self.letter().class().admits(modifier) {
            Symbol((self.0 & !MODIFIER_MASK) | ((modifier as u16) << MODIFIER_SHIFT))
        } else {
            self
        }
    }

    pub const fn without_modifier(self) -> Symbol {
        Symbol(self.0 & !MODIFIER_MASK)
    }

    /// Consonants carry no tone; for them this is a no-op.
    pub const fn with_tone(self, tone: Tone) -> Symbol {
        if self.is_vowel() {
            Symbol((self.0 & !TONE_MASK) | ((tone as u16) << TONE_SHIFT))
        } else {
            self
        }
    }

    pub const fn without_tone(self) -> Symbol {
        Symbol(self.0 & !TONE_MASK)
    }

    /// Strips both modifier and tone, keeping case.
    pub const fn base(self) -> Symbol {
        Symbol(self.0 & (LETTER_MASK | UPPER_BIT))
    }

    pub const fn with_case(self, upper: bool) -> Symbol {
        if upper {
            Symbol(self.0 | UPPER_BIT)
        } else {
            Symbol(self.0 & !UPPER_BIT)
        }
    }

    pub const fn to_upper(self) -> Symbol {
        self.with_case(true)
    }

    pub const fn to_lower(self) -> Symbol {
        self.with_case(false)
    }

    pub const fn toggle_case(self) -> Symbol {
        Symbol(self.0 ^ UPPER_BIT)
    }

    /// Case- and tone-insensitive ordering key used by the sequence tables.
    /// Zero is reserved for "no letter".
    #[inline(always)]
    pub(crate) const fn seq_key(self) -> u8 {
        (self.letter() as u8) * 4 + self.modifier() as u8 + 1
    }

    /// Renders the precomposed character.
    pub fn to_char(self) -> char {
        let upper = self.is_upper();
        if let Some(row) = vowel_row(self.letter(), self.modifier()) {
            let table = if upper { &UPPER_VOWELS } else { &LOWER_VOWELS };
            return table[row][self.tone().index()];
        }
        match self.letter() {
            Letter::DStroke if upper => 'Đ',
            Letter::DStroke => 'đ',
            other if upper => other.ascii().to_ascii_uppercase() as char,
            other => other.ascii() as char,
        }
    }

    /// Parses an ASCII letter or a precomposed Vietnamese letter.
    pub fn from_char(c: char) -> Option<Symbol> {
        if c.is_ascii() {
            let b = c as u8;
            let letter = Letter::from_ascii(b)?;
            return Some(Symbol::new(letter).with_case(b.is_ascii_uppercase()));
        }
        match c {
            'đ' => return Some(Symbol::new(Letter::DStroke)),
            'Đ' => return Some(Symbol::new(Letter::DStroke).to_upper()),
            _ => {}
        }
        for (upper, table) in [(false, &LOWER_VOWELS), (true, &UPPER_VOWELS)] {
            for (row, forms) in table.iter().enumerate() {
                if let Some(tone) = forms.iter().position(|&f| f == c) {
                    let (letter, modifier) = VOWEL_ROWS[row];
                    return Some(
                        Symbol::new(letter)
                            .with_modifier(modifier)
                            .with_tone(TONES[tone])
                            .with_case(upper),
                    );
                }
            }
        }
        None
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.to_char())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

const VOWEL_ROWS: [(Letter, Modifier); 12] = [
    (Letter::A, Modifier::None),
    (Letter::A, Modifier::Breve),
    (Letter::A, Modifier::Circumflex),
    (Letter::E, Modifier::None),
    (Letter::E, Modifier::Circumflex),
    (Letter::I, Modifier::None),
    (Letter::O, Modifier::None),
    (Letter::O, Modifier::Circumflex),
    (Letter::O, Modifier::Horn),
    (Letter::U, Modifier::None),
    (Letter::U, Modifier::Horn),
    (Letter::Y, Modifier::None),
];

#[inline(always)]
fn vowel_row(letter: Letter, modifier: Modifier) -> Option<usize> {
    VOWEL_ROWS
        .iter()
        .position(|&(l, m)| l == letter && m == modifier)
}

// Columns follow `Tone`: none, acute, grave, hook, tilde, dot.
const LOWER_VOWELS: [[char; 6]; 12] = [
    ['a', 'á', 'à', 'ả', 'ã', 'ạ'],
    ['ă', 'ắ', 'ằ', 'ẳ', 'ẵ', 'ặ'],
    ['â', 'ấ', 'ầ', 'ẩ', 'ẫ', 'ậ'],
    ['e', 'é', 'è', 'ẻ', 'ẽ', 'ẹ'],
    ['ê', 'ế', 'ề', 'ể', 'ễ', 'ệ'],
    ['i', 'í', 'ì', 'ỉ', 'ĩ', 'ị'],
    ['o', 'ó', 'ò', 'ỏ', 'õ', 'ọ'],
    ['ô', 'ố', 'ồ', 'ổ', 'ỗ', 'ộ'],
    ['ơ', 'ớ', 'ờ', 'ở', 'ỡ', 'ợ'],
    ['u', 'ú', 'ù', 'ủ', 'ũ', 'ụ'],
    ['ư', 'ứ', 'ừ', 'ử', 'ữ', 'ự'],
    ['y', 'ý', 'ỳ', 'ỷ', 'ỹ', 'ỵ'],
];

const UPPER_VOWELS: [[char; 6]; 12] = [
    ['A', 'Á', 'À', 'Ả', 'Ã', 'Ạ'],
    ['Ă', 'Ắ', 'Ằ', 'Ẳ', 'Ẵ', 'Ặ'],
    ['Â', 'Ấ', 'Ầ', 'Ẩ', 'Ẫ', 'Ậ'],
    ['E', 'É', 'È', 'Ẻ', 'Ẽ', 'Ẹ'],
    ['Ê', 'Ế', 'Ề', 'Ể', 'Ễ', 'Ệ'],
    ['I', 'Í', 'Ì', 'Ỉ', 'Ĩ', 'Ị'],
    ['O', 'Ó', 'Ò', 'Ỏ', 'Õ', 'Ọ'],
    ['Ô', 'Ố', 'Ồ', 'Ổ', 'Ỗ', 'Ộ'],
    ['Ơ', 'Ớ', 'Ờ', 'Ở', 'Ỡ', 'Ợ'],
    ['U', 'Ú', 'Ù', 'Ủ', 'Ũ', 'Ụ'],
    ['Ư', 'Ứ', 'Ừ', 'Ử', 'Ữ', 'Ự'],
    ['Y', 'Ý', 'Ỳ', 'Ỷ', 'Ỹ', 'Ỵ'],
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    #[test]
    fn ascii_letters_map_around_d_stroke() {
        assert_eq!(Letter::from_ascii(b'd'), Some(Letter::D));
        assert_eq!(Letter::from_ascii(b'e'), Some(Letter::E));
        assert_eq!(Letter::from_ascii(b'Z'), Some(Letter::Z));
        assert_eq!(Letter::from_ascii(b'1'), None);
        for b in b'a'..=b'z' {
            let letter = Letter::from_ascii(b).unwrap();
            assert_eq!(letter.ascii(), b);
        }
    }

    #[test]
    fn every_precomposed_vowel_parses_back() {
        for table in [&LOWER_VOWELS, &UPPER_VOWELS] {
            for forms in table.iter() {
                for &c in forms.iter() {
                    assert_eq!(sym(c).to_char(), c);
                }
            }
        }
    }

    #[test]
    fn modifier_and_tone_are_orthogonal() {
        let a = sym('a');
        let roofed = a.with_modifier(Modifier::Circumflex);
        assert_eq!(roofed.to_char(), 'â');
        assert_eq!(roofed.with_tone(Tone::Dot).to_char(), 'ậ');
        assert_eq!(a.with_tone(Tone::Dot).with_modifier(Modifier::Circumflex).to_char(), 'ậ');
        assert_eq!(sym('ậ').without_tone().to_char(), 'â');
        assert_eq!(sym('ậ').without_modifier().to_char(), 'ạ');
        assert_eq!(sym('Ậ').base().to_char(), 'A');
    }

    #[test]
    fn inapplicable_changes_are_no_ops() {
        let b = sym('b');
        assert_eq!(b.with_modifier(Modifier::Circumflex), b);
        assert_eq!(b.with_tone(Tone::Acute), b);
        assert_eq!(sym('i').with_modifier(Modifier::Horn), sym('i'));
        assert_eq!(sym('e').with_modifier(Modifier::Breve), sym('e'));
        assert_eq!(sym('u').with_modifier(Modifier::Circumflex), sym('u'));
        assert_eq!(sym('đ').with_tone(Tone::Grave).to_char(), 'đ');
    }

    #[test]
    fn horn_and_breve_follow_letter_class() {
        assert_eq!(sym('o').with_modifier(Modifier::Horn).to_char(), 'ơ');
        assert_eq!(sym('U').with_modifier(Modifier::Horn).to_char(), 'Ư');
        assert_eq!(sym('a').with_modifier(Modifier::Breve).to_char(), 'ă');
        // replacing one modifier with another
        assert_eq!(sym('â').with_modifier(Modifier::Breve).to_char(), 'ă');
    }

    #[test]
    fn case_round_trips() {
        assert_eq!(sym('đ').to_upper().to_char(), 'Đ');
        assert_eq!(sym('Ế').to_lower().to_char(), 'ế');
        assert_eq!(sym('q').toggle_case().to_char(), 'Q');
        assert!(sym('Ư').is_upper());
    }

    #[test]
    fn seq_key_ignores_case_and_tone() {
        assert_eq!(sym('Ấ').seq_key(), sym('â').seq_key());
        assert!(sym('a').seq_key() < sym('â').seq_key());
        assert!(sym('â').seq_key() < sym('ă').seq_key());
        assert!(sym('ơ').seq_key() < sym('u').seq_key());
    }
}
