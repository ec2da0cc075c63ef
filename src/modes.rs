use crate::symbol::{Letter, Symbol, Tone};
use crate::tables::{HookTarget, RoofTarget};

/// Keystroke convention.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum InputMethod {
    #[default]
    Telex,
    Vni,
    Viqr,
}

impl InputMethod {
    pub const ALL: [InputMethod; 3] = [InputMethod::Telex, InputMethod::Vni, InputMethod::Viqr];

    pub const fn name(self) -> &'static str {
        match self {
            InputMethod::Telex => "telex",
            InputMethod::Vni => "vni",
            InputMethod::Viqr => "viqr",
        }
    }
}

impl core::fmt::Display for InputMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "std")]
impl core::str::FromStr for InputMethod {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputMethod::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::UnknownInputMethod(s.to_string()))
    }
}

/// What a key asks the engine to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Append,
    /// `Tone::None` removes the tone of the active run.
    Tone(Tone),
    Roof(RoofTarget),
    Hook(HookTarget),
    Dd,
    /// Next key is taken literally.
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// Part of the Vietnamese alphabet.
    Letter,
    /// Alphabetic but not Vietnamese (`f j w z`, other scripts).
    Foreign,
    /// Space, digits, punctuation.
    WordBreak,
    /// Control characters.
    Reset,
}

pub struct Mode {
    pub method: InputMethod,
    pub actions: &'static [KeyAction; 128],
    pub classify: &'static [KeyClass; 128],
}

impl Mode {
    /// Uppercase keys resolve to the action of their lowercase form.
    #[inline(always)]
    pub fn action(&self, ch: char) -> KeyAction {
        if ch.is_ascii() {
            self.actions[ch.to_ascii_lowercase() as usize]
        } else {
            KeyAction::Append
        }
    }

    #[inline(always)]
    pub fn classify(&self, ch: char) -> KeyClass {
        if ch.is_ascii() {
            return self.classify[ch as usize];
        }
        if Symbol::from_char(ch).is_some() {
            KeyClass::Letter
        } else if ch.is_alphabetic() {
            KeyClass::Foreign
        } else if ch.is_control() {
            KeyClass::Reset
        } else {
            KeyClass::WordBreak
        }
    }
}

pub fn mode_for(method: InputMethod) -> &'static Mode {
    match method {
        InputMethod::Telex => &TELEX_MODE,
        InputMethod::Vni => &VNI_MODE,
        InputMethod::Viqr => &VIQR_MODE,
    }
}

static TELEX_MODE: Mode = Mode {
    method: InputMethod::Telex,
    actions: &ACTIONS_TELEX,
    classify: &CLASSIFY,
};

static VNI_MODE: Mode = Mode {
    method: InputMethod::Vni,
    actions: &ACTIONS_VNI,
    classify: &CLASSIFY,
};

static VIQR_MODE: Mode = Mode {
    method: InputMethod::Viqr,
    actions: &ACTIONS_VIQR,
    classify: &CLASSIFY,
};

pub const CLASSIFY: [KeyClass; 128] = {
    let mut t = [KeyClass::WordBreak; 128];
    let mut i = 0;
    while i < 0x20 {
        t[i] = KeyClass::Reset;
        i += 1;
    }
    t[0x7F] = KeyClass::Reset;
    let mut b = b'a';
    while b <= b'z' {
        let class = match Letter::from_ascii(b) {
            Some(letter) if letter.class().native => KeyClass::Letter,
            _ => KeyClass::Foreign,
        };
        t[b as usize] = class;
        t[b.to_ascii_uppercase() as usize] = class;
        b += 1;
    }
    t
};

pub const ACTIONS_TELEX: [KeyAction; 128] = {
    let mut t = [KeyAction::Append; 128];
    t[b's' as usize] = KeyAction::Tone(Tone::Acute);
    t[b'f' as usize] = KeyAction::Tone(Tone::Grave);
    t[b'r' as usize] = KeyAction::Tone(Tone::Hook);
    t[b'x' as usize] = KeyAction::Tone(Tone::Tilde);
    t[b'j' as usize] = KeyAction::Tone(Tone::Dot);
    t[b'z' as usize] = KeyAction::Tone(Tone::None);

    t[b'a' as usize] = KeyAction::Roof(RoofTarget::A);
    t[b'e' as usize] = KeyAction::Roof(RoofTarget::E);
    t[b'o' as usize] = KeyAction::Roof(RoofTarget::O);

    t[b'w' as usize] = KeyAction::Hook(HookTarget::Any);
    t[b'd' as usize] = KeyAction::Dd;
    t
};

pub const ACTIONS_VNI: [KeyAction; 128] = {
    let mut t = [KeyAction::Append; 128];
    t[b'0' as usize] = KeyAction::Tone(Tone::None);
    t[b'1' as usize] = KeyAction::Tone(Tone::Acute);
    t[b'2' as usize] = KeyAction::Tone(Tone::Grave);
    t[b'3' as usize] = KeyAction::Tone(Tone::Hook);
    t[b'4' as usize] = KeyAction::Tone(Tone::Tilde);
    t[b'5' as usize] = KeyAction::Tone(Tone::Dot);

    t[b'6' as usize] = KeyAction::Roof(RoofTarget::Any);
    t[b'7' as usize] = KeyAction::Hook(HookTarget::Horn);
    t[b'8' as usize] = KeyAction::Hook(HookTarget::Breve);
    t[b'9' as usize] = KeyAction::Dd;
    t
};

pub const ACTIONS_VIQR: [KeyAction; 128] = {
    let mut t = [KeyAction::Append; 128];
    t[b'\'' as usize] = KeyAction::Tone(Tone::Acute);
    t[b'`' as usize] = KeyAction::Tone(Tone::Grave);
    t[b'?' as usize] = KeyAction::Tone(Tone::Hook);
    t[b'~' as usize] = KeyAction::Tone(Tone::Tilde);
    t[b'.' as usize] = KeyAction::Tone(Tone::Dot);

    t[b'^' as usize] = KeyAction::Roof(RoofTarget::Any);
    t[b'+' as usize] = KeyAction::Hook(HookTarget::Horn);
    t[b'(' as usize] = KeyAction::Hook(HookTarget::Breve);
    t[b'd' as usize] = KeyAction::Dd;
    t[b'\\' as usize] = KeyAction::Escape;
    t
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_keys_share_actions() {
        let telex = mode_for(InputMethod::Telex);
        assert_eq!(telex.action('S'), KeyAction::Tone(Tone::Acute));
        assert_eq!(telex.action('W'), KeyAction::Hook(HookTarget::Any));
        assert_eq!(telex.action('D'), KeyAction::Dd);
        assert_eq!(telex.action('b'), KeyAction::Append);
        assert_eq!(telex.action('ư'), KeyAction::Append);
    }

    #[test]
    fn conventions_map_their_own_keys() {
        let vni = mode_for(InputMethod::Vni);
        assert_eq!(vni.action('6'), KeyAction::Roof(RoofTarget::Any));
        assert_eq!(vni.action('d'), KeyAction::Append);
        assert_eq!(vni.action('s'), KeyAction::Append);
        let viqr = mode_for(InputMethod::Viqr);
        assert_eq!(viqr.action('\''), KeyAction::Tone(Tone::Acute));
        assert_eq!(viqr.action('('), KeyAction::Hook(HookTarget::Breve));
        assert_eq!(viqr.action('\\'), KeyAction::Escape);
        assert_eq!(viqr.action('1'), KeyAction::Append);
    }

    #[test]
    fn classification() {
        let mode = mode_for(InputMethod::Telex);
        assert_eq!(mode.classify('a'), KeyClass::Letter);
        assert_eq!(mode.classify('Q'), KeyClass::Letter);
        assert_eq!(mode.classify('w'), KeyClass::Foreign);
        assert_eq!(mode.classify('J'), KeyClass::Foreign);
        assert_eq!(mode.classify(' '), KeyClass::WordBreak);
        assert_eq!(mode.classify('5'), KeyClass::WordBreak);
        assert_eq!(mode.classify('\n'), KeyClass::Reset);
        assert_eq!(mode.classify('\u{7f}'), KeyClass::Reset);
        assert_eq!(mode.classify('ệ'), KeyClass::Letter);
        assert_eq!(mode.classify('Đ'), KeyClass::Letter);
        assert_eq!(mode.classify('ß'), KeyClass::Foreign);
        assert_eq!(mode.classify('…'), KeyClass::WordBreak);
    }

    #[test]
    fn ascii_letters_follow_the_alphabet() {
        let mode = mode_for(InputMethod::Vni);
        for b in b'a'..=b'z' {
            let native = Letter::from_ascii(b).is_some_and(|letter| letter.class().native);
            let expected = if native {
                KeyClass::Letter
            } else {
                KeyClass::Foreign
            };
            assert_eq!(mode.classify(b as char), expected, "{}", b as char);
            assert_eq!(mode.classify(b.to_ascii_uppercase() as char), expected);
        }
        for foreign in ['f', 'j', 'w', 'z'] {
            assert_eq!(mode.classify(foreign), KeyClass::Foreign);
        }
        let foreign = (b'a'..=b'z')
            .filter(|&b| mode.classify(b as char) == KeyClass::Foreign)
            .count();
        assert_eq!(foreign, 4);
    }

    #[cfg(feature = "std")]
    #[test]
    fn input_method_names() {
        assert_eq!("VNI".parse::<InputMethod>().ok(), Some(InputMethod::Vni));
        assert_eq!("viqr".parse::<InputMethod>().ok(), Some(InputMethod::Viqr));
        assert!("dvorak".parse::<InputMethod>().is_err());
        for method in InputMethod::ALL {
            assert_eq!(mode_for(method).method, method);
        }
    }
}
