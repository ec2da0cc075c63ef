use core::mem;

use log::{debug, trace};

use crate::buffers::{OutBuffer, new_out_buffer};
use crate::modes::{InputMethod, KeyAction, KeyClass, Mode, mode_for};
use crate::options::Options;
use crate::symbol::{Letter, Symbol, Tone};
use crate::tables::{
    ConsonantSeq, HookTarget, RoofTarget, VowelSeq, lookup_consonant_seq, lookup_vowel_seq,
};
use crate::word::{RunSeq, WordForm, WordPosition};

/// Slots per word. Appending past this resets the word first.
pub const WORD_CAPACITY: usize = 32;

/// What the host does with one keystroke: delete `retract` trailing
/// characters, then insert `emit`. With `handled == false` the host inserts
/// the key itself instead of `emit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessResult {
    pub retract: usize,
    pub emit: OutBuffer,
    pub handled: bool,
}

impl ProcessResult {
    fn pass_through() -> Self {
        Self {
            retract: 0,
            emit: new_out_buffer(),
            handled: false,
        }
    }

    fn consumed() -> Self {
        Self {
            handled: true,
            ..Self::pass_through()
        }
    }

    fn unhandled(display: char) -> Self {
        let mut emit = new_out_buffer();
        let _ = emit.push(display);
        Self {
            retract: 0,
            emit,
            handled: false,
        }
    }
}

#[cfg(feature = "std")]
impl ProcessResult {
    /// Applies the result of [`ViEngine::process`] for key `ch` to `text`.
    pub fn apply_key(&self, text: &mut String, ch: char) {
        if self.handled {
            self.splice(text);
        } else {
            text.push(ch);
        }
    }

    /// Applies the result of [`ViEngine::process_backspace`] to `text`.
    pub fn apply_backspace(&self, text: &mut String) {
        if self.handled {
            self.splice(text);
        } else {
            for _ in 0..self.retract {
                text.pop();
            }
        }
    }

    fn splice(&self, text: &mut String) {
        for _ in 0..self.retract {
            text.pop();
        }
        text.push_str(&self.emit);
    }
}

#[derive(Clone, Copy, Debug)]
struct VowelRun {
    start: usize,
    end: usize,
    seq: VowelSeq,
    /// No final consonant follows.
    terminated: bool,
}

/// Keystroke-level Vietnamese engine for one typing context.
#[derive(Clone)]
pub struct ViEngine {
    slots: [WordPosition; WORD_CAPACITY],
    cursor: Option<usize>,
    single_mode: bool,
    escaped: bool,
    input_method: InputMethod,
    mode: &'static Mode,
    options: Options,
}

impl Default for ViEngine {
    fn default() -> Self {
        Self::new(InputMethod::default())
    }
}

impl ViEngine {
    pub fn new(input_method: InputMethod) -> Self {
        Self::with_options(input_method, Options::default())
    }

    pub fn with_options(input_method: InputMethod, options: Options) -> Self {
        Self {
            slots: [WordPosition::EMPTY; WORD_CAPACITY],
            cursor: None,
            single_mode: false,
            escaped: false,
            input_method,
            mode: mode_for(input_method),
            options,
        }
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    /// Swaps the key map. The current word is kept.
    pub fn set_input_method(&mut self, method: InputMethod) {
        if method != self.input_method {
            debug!("input method {} -> {}", self.input_method, method);
        }
        self.input_method = method;
        self.mode = mode_for(method);
        self.escaped = false;
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn set_free_marking(&mut self, on: bool) {
        self.options.free_marking = on;
    }

    pub fn set_modern_style(&mut self, on: bool) {
        self.options.modern_style = on;
    }

    pub fn reset(&mut self) {
        self.slots = [WordPosition::EMPTY; WORD_CAPACITY];
        self.cursor = None;
        self.single_mode = false;
        self.escaped = false;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Live slots of the current word.
    pub fn positions(&self) -> &[WordPosition] {
        &self.slots[..self.len()]
    }

    /// The current word as the host should be showing it.
    pub fn word(&self) -> OutBuffer {
        let mut out = new_out_buffer();
        for slot in self.positions() {
            let _ = out.push(slot.display());
        }
        out
    }

    #[inline(always)]
    pub fn process_char(&mut self, ch: char) -> ProcessResult {
        self.process(ch as u32, ch)
    }

    pub fn process(&mut self, key_code: u32, ch: char) -> ProcessResult {
        let single = mem::take(&mut self.single_mode);
        let class = self.mode.classify(ch);
        let action = if mem::take(&mut self.escaped) {
            KeyAction::Append
        } else {
            self.mode.action(ch)
        };

        let handled = match action {
            KeyAction::Append => None,
            KeyAction::Tone(tone) => self.apply_tone(tone),
            KeyAction::Roof(target) => self.apply_roof(target),
            KeyAction::Hook(target) => self.apply_hook(target),
            KeyAction::Dd => self.toggle_dd(),
            KeyAction::Escape => {
                self.escaped = true;
                Some(ProcessResult::consumed())
            }
        };
        let result = match handled {
            Some(result) => result,
            None => self.fallback(key_code, ch, class, single),
        };
        trace!(
            "{} key {:?} {:?} -> retract {} emit {:?} handled {}",
            self.input_method, ch, action, result.retract, result.emit, result.handled
        );
        result
    }

    /// Call before the host applies its own backspace.
    pub fn process_backspace(&mut self) -> ProcessResult {
        self.single_mode = false;
        self.escaped = false;
        let Some(cur) = self.cursor else {
            return ProcessResult {
                retract: 1,
                ..ProcessResult::pass_through()
            };
        };
        self.slots[cur] = WordPosition::EMPTY;
        self.cursor = cur.checked_sub(1);
        let result = match self.relocate_tone() {
            Some(from) => self.rewrite_span(from, cur + 1 - from),
            None => ProcessResult {
                retract: 1,
                ..ProcessResult::consumed()
            },
        };
        trace!(
            "backspace -> retract {} emit {:?} handled {}",
            result.retract, result.emit, result.handled
        );
        result
    }

    #[inline(always)]
    fn len(&self) -> usize {
        self.cursor.map_or(0, |cur| cur + 1)
    }

    fn fallback(&mut self, key_code: u32, ch: char, class: KeyClass, single: bool) -> ProcessResult {
        match class {
            KeyClass::WordBreak | KeyClass::Reset => {
                self.reset();
                ProcessResult::pass_through()
            }
            KeyClass::Letter | KeyClass::Foreign => self.append(key_code, ch, class, single),
        }
    }

    fn append(&mut self, key_code: u32, ch: char, class: KeyClass, single: bool) -> ProcessResult {
        if self.len() == WORD_CAPACITY {
            debug!("word buffer full, resetting before {:?}", ch);
            self.reset();
        }
        let index = self.len();
        let sym = match class {
            KeyClass::Letter => Symbol::from_char(ch),
            _ => None,
        };
        let mut slot = WordPosition::new(key_code, ch, sym);
        let prev_form = index
            .checked_sub(1)
            .map_or(WordForm::Empty, |prev| self.slots[prev].form);
        if let Some(sym) = sym {
            if prev_form != WordForm::NonVn {
                if sym.is_vowel() {
                    self.place_vowel(index, &mut slot, single);
                } else {
                    self.place_consonant(index, &mut slot);
                }
            }
        }
        self.slots[index] = slot;
        self.cursor = Some(index);

        match self.relocate_tone() {
            // the new slot has not been shown yet
            Some(from) => self.rewrite_span(from, index - from),
            None => ProcessResult::unhandled(slot.display()),
        }
    }

    fn place_vowel(&self, index: usize, slot: &mut WordPosition, single: bool) {
        let Some(sym) = slot.sym else { return };
        let single_run = lookup_vowel_seq(&[sym]).map_or(RunSeq::None, RunSeq::Vowel);
        let Some(prev) = index.checked_sub(1).map(|i| self.slots[i]) else {
            slot.form = WordForm::V;
            slot.v_offset = Some(0);
            slot.seq = single_run;
            return;
        };
        match prev.form {
            WordForm::Empty | WordForm::C => {
                slot.form = if prev.form == WordForm::C {
                    WordForm::CV
                } else {
                    WordForm::V
                };
                slot.c1_offset = prev.c1_offset.map(|o| o + 1);
                slot.v_offset = Some(0);
                slot.seq = single_run;
            }
            WordForm::V | WordForm::CV => {
                slot.form = prev.form;
                slot.c1_offset = prev.c1_offset.map(|o| o + 1);
                if single || !self.extend_vowel_run(index, slot) {
                    slot.v_offset = Some(0);
                    slot.seq = single_run;
                }
            }
            // a vowel after a final consonant leaves the slot non-Vietnamese
            WordForm::VC | WordForm::CVC | WordForm::NonVn => {}
        }
    }

    /// Tries to grow the vowel run ending before `index` by `slot`. A run
    /// opening with a glide is re-based past it when the full run has no
    /// table entry.
    fn extend_vowel_run(&self, index: usize, slot: &mut WordPosition) -> bool {
        let prev = self.slots[index - 1];
        let (Some(k), Some(sym)) = (prev.v_offset, slot.sym) else {
            return false;
        };
        let start = index - 1 - k as usize;
        let mut letters = [sym; 4];
        let mut n = 0;
        for run_slot in &self.slots[start..index] {
            let Some(run_sym) = run_slot.sym else {
                return false;
            };
            letters[n] = run_sym;
            n += 1;
        }
        letters[n] = sym;
        n += 1;

        let (start, seq) = match lookup_vowel_seq(&letters[..n]) {
            Some(seq) => (start, seq),
            None if n > 2 && self.is_glide(start) => match lookup_vowel_seq(&letters[1..n]) {
                Some(seq) => (start + 1, seq),
                None => return false,
            },
            None => return false,
        };
        slot.v_offset = Some((index - start) as u8);
        slot.seq = RunSeq::Vowel(seq);
        true
    }

    fn place_consonant(&self, index: usize, slot: &mut WordPosition) {
        let Some(sym) = slot.sym else { return };
        let Some(prev) = index.checked_sub(1).map(|i| self.slots[i]) else {
            if let Some(seq) = lookup_consonant_seq(&[sym]) {
                slot.form = WordForm::C;
                slot.c1_offset = Some(0);
                slot.seq = RunSeq::Consonant(seq);
            }
            return;
        };
        match prev.form {
            WordForm::C => {
                let Some(k) = prev.c1_offset else { return };
                let start = index - 1 - k as usize;
                if let Some(seq) = self.extend_consonants(start, index, sym) {
                    slot.form = WordForm::C;
                    slot.c1_offset = Some(k + 1);
                    slot.seq = RunSeq::Consonant(seq);
                }
            }
            WordForm::V | WordForm::CV => {
                let (Some(k), Some(run_seq)) = (prev.v_offset, prev.seq.vowel()) else {
                    return;
                };
                let start = index - 1 - k as usize;
                let (_, run_seq) = self.glide_adjusted(start, run_seq);
                let Some(seq) = lookup_consonant_seq(&[sym]) else {
                    return;
                };
                if run_seq.allows_suffix() && seq.is_suffix() {
                    slot.form = if prev.form == WordForm::CV {
                        WordForm::CVC
                    } else {
                        WordForm::VC
                    };
                    slot.c1_offset = prev.c1_offset.map(|o| o + 1);
                    slot.v_offset = Some(k + 1);
                    slot.c2_offset = Some(0);
                    slot.seq = RunSeq::Consonant(seq);
                }
            }
            WordForm::VC | WordForm::CVC => {
                let (Some(k), Some(v)) = (prev.c2_offset, prev.v_offset) else {
                    return;
                };
                let start = index - 1 - k as usize;
                let Some(seq) = self.extend_consonants(start, index, sym) else {
                    return;
                };
                if seq.is_suffix() {
                    slot.form = prev.form;
                    slot.c1_offset = prev.c1_offset.map(|o| o + 1);
                    slot.v_offset = Some(v + 1);
                    slot.c2_offset = Some(k + 1);
                    slot.seq = RunSeq::Consonant(seq);
                }
            }
            WordForm::Empty | WordForm::NonVn => {}
        }
    }

    fn extend_consonants(
        &self,
        start: usize,
        index: usize,
        sym: Symbol,
    ) -> Option<ConsonantSeq> {
        let mut letters = [sym; 3];
        let run = self.slots.get(start..index)?;
        if run.len() >= letters.len() {
            return None;
        }
        for (letter, run_slot) in letters.iter_mut().zip(run) {
            *letter = run_slot.sym?;
        }
        lookup_consonant_seq(&letters[..=run.len()])
    }

    /// `qu` and a lone `gi` open the run with a glide that never takes the
    /// tone.
    fn is_glide(&self, start: usize) -> bool {
        let Some(prev) = start.checked_sub(1).map(|i| self.slots[i]) else {
            return false;
        };
        if prev.form != WordForm::C {
            return false;
        }
        let (Some(onset), Some(vowel)) = (prev.sym, self.slots[start].sym) else {
            return false;
        };
        match (onset.letter(), vowel.letter()) {
            (Letter::Q, Letter::U) => true,
            (Letter::G, Letter::I) => prev.c1_offset == Some(0),
            _ => false,
        }
    }

    /// Run start and sequence with a leading glide dropped.
    fn glide_adjusted(&self, start: usize, seq: VowelSeq) -> (usize, VowelSeq) {
        if seq.len() > 1 && self.is_glide(start) {
            if let Some(tail) = lookup_vowel_seq(&seq.letters()[1..]) {
                return (start + 1, tail);
            }
        }
        (start, seq)
    }

    fn glide_tail(&self, run: VowelRun) -> Option<VowelRun> {
        let (start, seq) = self.glide_adjusted(run.start, run.seq);
        (start != run.start).then_some(VowelRun { start, seq, ..run })
    }

    /// The vowel run at or just behind the cursor.
    fn vowel_run(&self) -> Option<VowelRun> {
        let cur = self.cursor?;
        let slot = &self.slots[cur];
        let (end, terminated) = match slot.form {
            WordForm::V | WordForm::CV => (cur, true),
            WordForm::VC | WordForm::CVC => (cur.checked_sub(slot.c2_offset? as usize + 1)?, false),
            _ => return None,
        };
        let start = cur.checked_sub(slot.v_offset? as usize)?;
        let seq = self.slots[end].seq.vowel()?;
        if end < start || end - start + 1 != seq.len() {
            return None;
        }
        Some(VowelRun {
            start,
            end,
            seq,
            terminated,
        })
    }

    fn tone_position(&self, run: &VowelRun) -> usize {
        let (start, seq) = self.glide_adjusted(run.start, run.seq);
        start + seq.tone_offset(run.terminated, self.options.modern_style)
    }

    fn toned_slot(&self, run: &VowelRun) -> Option<usize> {
        (run.start..=run.end)
            .rev()
            .find(|&i| self.slots[i].tone != Tone::None)
    }

    /// Moves the run's tone to where the placement rule now puts it.
    /// Returns the lowest slot touched.
    fn relocate_tone(&mut self) -> Option<usize> {
        let run = self.vowel_run()?;
        let old = self.toned_slot(&run)?;
        let target = self.tone_position(&run);
        if old == target {
            return None;
        }
        let tone = mem::take(&mut self.slots[old].tone);
        self.slots[target].tone = tone;
        Some(old.min(target))
    }

    fn apply_tone(&mut self, tone: Tone) -> Option<ProcessResult> {
        let run = self.vowel_run()?;
        if !self.options.free_marking && !run.terminated {
            return None;
        }
        let current = self.toned_slot(&run);
        if tone == Tone::None {
            let at = current?;
            self.slots[at].tone = Tone::None;
            return Some(self.rewrite(at));
        }

        let target = self.tone_position(&run);
        if current == Some(target) && self.slots[target].tone == tone {
            self.slots[target].tone = Tone::None;
            self.single_mode = true;
            return Some(self.rewrite(target));
        }
        if let Some(at) = current {
            self.slots[at].tone = Tone::None;
        }
        self.slots[target].tone = tone;
        Some(self.rewrite(current.map_or(target, |at| at.min(target))))
    }

    fn apply_roof(&mut self, target: RoofTarget) -> Option<ProcessResult> {
        let run = self.vowel_run()?;
        let (run, seq, removing) = self.transition(
            run,
            |seq| seq.with_roof(target),
            |seq| seq.without_roof(target),
        )?;
        self.remodel(run, seq, removing)
    }

    fn apply_hook(&mut self, target: HookTarget) -> Option<ProcessResult> {
        let run = self.vowel_run()?;
        let (run, seq, removing) = self.transition(
            run,
            |seq| seq.with_hook(target),
            |seq| seq.without_hook(target),
        )?;
        self.remodel(run, seq, removing)
    }

    /// Picks the add or remove transition for the run without its glide,
    /// then for the whole run. The glide letter never takes a modifier.
    fn transition(
        &self,
        run: VowelRun,
        add: impl Fn(VowelSeq) -> Option<VowelSeq>,
        remove: impl Fn(VowelSeq) -> Option<VowelSeq>,
    ) -> Option<(VowelRun, VowelSeq, bool)> {
        let tail = self.glide_tail(run);
        let whole = tail.is_none().then_some(run);
        for candidate in [tail, whole].into_iter().flatten() {
            if let Some(seq) = add(candidate.seq) {
                return Some((candidate, seq, false));
            }
            if let Some(seq) = remove(candidate.seq) {
                return Some((candidate, seq, true));
            }
        }
        None
    }

    /// Rewrites the run's letters to `seq`.
    fn remodel(&mut self, run: VowelRun, seq: VowelSeq, removing: bool) -> Option<ProcessResult> {
        let len = seq.len();
        let changed = |k: usize| {
            self.slots[run.start + k]
                .sym
                .is_some_and(|sym| sym.modifier() != seq.letter(k).modifier())
        };
        let first = (0..len).find(|&k| changed(k))?;
        let last = (0..len).rev().find(|&k| changed(k))?;
        if !self.options.free_marking && Some(run.start + last) != self.cursor {
            return None;
        }
        let cur = self.cursor?;

        for k in 0..len {
            let slot = &mut self.slots[run.start + k];
            slot.sym = Some(seq.letter(k).with_case(slot.caps));
            slot.v_offset = Some(k as u8);
            slot.seq = RunSeq::Vowel(seq.prefix(k));
        }
        for i in run.end + 1..=cur {
            self.slots[i].v_offset = Some((i - run.start) as u8);
        }
        if removing {
            self.single_mode = true;
        }

        let from = run.start + first;
        let from = self.relocate_tone().map_or(from, |moved| moved.min(from));
        Some(self.rewrite(from))
    }

    fn toggle_dd(&mut self) -> Option<ProcessResult> {
        let cur = self.cursor?;
        let slot = &self.slots[cur];
        if slot.form == WordForm::NonVn {
            return None;
        }
        let at = cur.checked_sub(slot.c1_offset? as usize)?;
        if !self.options.free_marking && at != cur {
            return None;
        }
        let sym = self.slots[at].sym?;
        let (toggled, removing) = match sym.letter() {
            Letter::D => (Symbol::new(Letter::DStroke), false),
            Letter::DStroke => (Symbol::new(Letter::D), true),
            _ => return None,
        };
        let toggled = toggled.with_case(sym.is_upper());
        let target = &mut self.slots[at];
        target.sym = Some(toggled);
        if let Some(seq) = lookup_consonant_seq(&[toggled]) {
            target.seq = RunSeq::Consonant(seq);
        }
        if removing {
            self.single_mode = true;
        }
        Some(self.rewrite(at))
    }

    #[inline(always)]
    fn rewrite(&self, from: usize) -> ProcessResult {
        let retract = self.cursor.map_or(0, |cur| cur + 1 - from);
        self.rewrite_span(from, retract)
    }

    fn rewrite_span(&self, from: usize, retract: usize) -> ProcessResult {
        let mut emit = new_out_buffer();
        if let Some(slots) = self.cursor.and_then(|cur| self.slots.get(from..=cur)) {
            for slot in slots {
                let _ = emit.push(slot.display());
            }
        }
        ProcessResult {
            retract,
            emit,
            handled: true,
        }
    }
}
