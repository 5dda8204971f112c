//! Screen flow around rounds: intro, play, confirm dialog, game over, name
//! entry and leaderboard.
//!
//! `App` owns at most one [`Round`] and forwards pointer input and frame time
//! to it only while a round is on screen. Leaderboard persistence is
//! best-effort: a failed save is logged and the in-memory board still updates.

use log::{info, warn};

use crate::core::{CueSink, Round, RoundEvent, RoundEvents, RoundResult, RoundSnapshot, SimpleRng};
use crate::input::{PointerKind, TermPointer};
use crate::store::{validate_name, Leaderboard, LeaderboardStore, NameError};
use crate::term::{render_screen, FrameBuffer, GameView, ScreenView, Viewport};
use crate::types::{CoreError, Cue, GameConfig, MenuKey, Point, PointerEvent, MAX_NAME_CHARS};

/// Characters accepted in the name field before typing is refused.
const NAME_INPUT_LIMIT: usize = MAX_NAME_CHARS * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Playing,
    /// "Return to main menu?" over a running round.
    Confirm,
    GameOver,
    NameEntry,
    Leaderboard { after_register: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App<C: CueSink> {
    config: GameConfig,
    rng: SimpleRng,
    cues: C,
    store: LeaderboardStore,
    board: Leaderboard,
    screen: Screen,
    round: Option<Round>,
    last_result: Option<RoundResult>,
    registered: bool,
    highlight: Option<usize>,
    name_input: String,
    name_error: Option<NameError>,
    view: GameView,
    snapshot: RoundSnapshot,
}

impl<C: CueSink> App<C> {
    /// Check `config` and load the leaderboard.
    pub fn new(
        config: GameConfig,
        rng: SimpleRng,
        store: LeaderboardStore,
        cues: C,
    ) -> Result<Self, CoreError> {
        config.validate()?;
        let board = store.load();
        info!(
            "loaded {} leaderboard entries from {}",
            board.len(),
            store.path().display()
        );
        Ok(Self {
            config,
            rng,
            cues,
            store,
            board,
            screen: Screen::Intro,
            round: None,
            last_result: None,
            registered: false,
            highlight: None,
            name_input: String::with_capacity(NAME_INPUT_LIMIT),
            name_error: None,
            view: GameView::default(),
            snapshot: RoundSnapshot::default(),
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }

    pub fn last_result(&self) -> Option<&RoundResult> {
        self.last_result.as_ref()
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn name_error(&self) -> Option<NameError> {
        self.name_error
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    fn round_on_screen(&self) -> bool {
        matches!(self.screen, Screen::Playing | Screen::Confirm)
    }

    pub fn handle_key(&mut self, key: MenuKey) -> Control {
        if key == MenuKey::Confirm && self.screen != Screen::Playing {
            self.cues.play(Cue::Click);
        }
        match self.screen {
            Screen::Intro => match key {
                MenuKey::Confirm => self.start_round(),
                MenuKey::Char('l' | 'L') => {
                    self.highlight = None;
                    self.screen = Screen::Leaderboard {
                        after_register: false,
                    };
                }
                MenuKey::Char('q' | 'Q') | MenuKey::Back => return Control::Quit,
                _ => {}
            },
            Screen::Playing => {
                if key == MenuKey::Back {
                    // The release would land on the dialog and be dropped.
                    if let Some(round) = self.round.as_mut() {
                        round.cancel_gesture();
                    }
                    self.screen = Screen::Confirm;
                }
            }
            Screen::Confirm => match key {
                MenuKey::Confirm | MenuKey::Char('y' | 'Y') => self.abort_to_intro(),
                MenuKey::Back | MenuKey::Char('n' | 'N') => self.screen = Screen::Playing,
                _ => {}
            },
            Screen::GameOver => match key {
                MenuKey::Char('r' | 'R') if self.can_register() => {
                    self.name_input.clear();
                    self.name_error = None;
                    self.screen = Screen::NameEntry;
                }
                MenuKey::Confirm => self.start_round(),
                MenuKey::Back => self.go_to_intro(),
                _ => {}
            },
            Screen::NameEntry => match key {
                MenuKey::Char(c) => {
                    if self.name_input.chars().count() < NAME_INPUT_LIMIT {
                        self.name_input.push(c);
                    }
                    self.name_error = None;
                }
                MenuKey::Erase => {
                    self.name_input.pop();
                    self.name_error = None;
                }
                MenuKey::Back => self.screen = Screen::GameOver,
                MenuKey::Confirm => self.register_score(),
            },
            Screen::Leaderboard { .. } => match key {
                MenuKey::Confirm => self.start_round(),
                MenuKey::Back => self.go_to_intro(),
                _ => {}
            },
        }
        Control::Continue
    }

    /// Pointer input already in board pixels.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.screen != Screen::Playing {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let events = round.handle(event);
        self.dispatch(events);
    }

    /// Mouse input in terminal cells, mapped through the board layout.
    pub fn handle_mouse(&mut self, pointer: TermPointer, viewport: Viewport) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let grid = round.grid();
        let layout = self.view.layout(grid.rows(), grid.cols(), viewport);
        let p = layout.to_pixel(pointer.column, pointer.row, round.metrics());
        let event = match pointer.kind {
            PointerKind::Press => PointerEvent::Down(p),
            PointerKind::Drag => PointerEvent::Move(p),
            PointerKind::Release => PointerEvent::Up(p),
        };
        self.handle_pointer(event);
    }

    /// The terminal lost focus mid-drag: finish the gesture where it is.
    pub fn pointer_left(&mut self) {
        let dragging = self.round.as_ref().map(Round::is_dragging).unwrap_or(false);
        if dragging {
            self.handle_pointer(PointerEvent::Up(Point::default()));
        }
    }

    /// Feed frame time to the round. The clock keeps running under the
    /// confirm dialog.
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.round_on_screen() {
            return;
        }
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let events = round.advance(elapsed_ms);
        self.dispatch(events);
    }

    fn dispatch(&mut self, events: RoundEvents) {
        for event in events {
            match event {
                RoundEvent::Cue(cue) => self.cues.play(cue),
                RoundEvent::Matched { .. } | RoundEvent::Missed { .. } => {}
                RoundEvent::Ended(_) => self.finish_round(),
            }
        }
    }

    fn finish_round(&mut self) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        self.last_result = round.take_result();
        self.registered = false;
        self.screen = Screen::GameOver;
    }

    fn can_register(&self) -> bool {
        !self.registered
            && self
                .last_result
                .as_ref()
                .map(RoundResult::is_rankable)
                .unwrap_or(false)
    }

    fn start_round(&mut self) {
        match Round::new(self.config, &mut self.rng) {
            Ok(round) => {
                self.round = Some(round);
                self.last_result = None;
                self.registered = false;
                self.highlight = None;
                self.screen = Screen::Playing;
            }
            Err(e) => warn!("could not start round: {e}"),
        }
    }

    fn abort_to_intro(&mut self) {
        if let Some(round) = self.round.as_mut() {
            if let Some(result) = round.abort() {
                info!("round abandoned with {} points", result.score);
            }
            round.take_result();
        }
        self.go_to_intro();
    }

    fn go_to_intro(&mut self) {
        self.round = None;
        self.highlight = None;
        self.screen = Screen::Intro;
    }

    fn register_score(&mut self) {
        let Some(score) = self.last_result.as_ref().map(|r| r.score) else {
            self.screen = Screen::GameOver;
            return;
        };
        let name = match validate_name(&self.name_input) {
            Ok(name) => name,
            Err(e) => {
                self.name_error = Some(e);
                return;
            }
        };

        self.highlight = self.board.add(&name, score);
        self.registered = true;
        match self.highlight {
            Some(rank) => info!("{name} placed #{rank} with {score} points"),
            None => info!("{name} scored {score}, below the leaderboard"),
        }
        if let Err(e) = self.store.save(&self.board) {
            warn!("could not save leaderboard: {e:#}");
        }
        self.screen = Screen::Leaderboard {
            after_register: true,
        };
    }

    /// Hash of everything the current frame shows.
    pub fn frame_fingerprint(&mut self) -> u64 {
        const PRIME: u64 = 0x100000001b3;

        let mut h = match self.round.as_ref() {
            Some(round) => {
                round.snapshot_into(&mut self.snapshot);
                self.snapshot.fingerprint()
            }
            None => 0xcbf29ce484222325,
        };
        let tag = match self.screen {
            Screen::Intro => 1u8,
            Screen::Playing => 2,
            Screen::Confirm => 3,
            Screen::GameOver => 4,
            Screen::NameEntry => 5,
            Screen::Leaderboard { after_register } => 6 + after_register as u8,
        };
        let error = match self.name_error {
            None => 0u8,
            Some(NameError::Empty) => 1,
            Some(NameError::TooLong { .. }) => 2,
        };
        for b in [tag, error, self.registered as u8]
            .into_iter()
            .chain(self.name_input.bytes())
        {
            h ^= b as u64;
            h = h.wrapping_mul(PRIME);
        }
        h
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        if self.round_on_screen() || self.screen == Screen::GameOver {
            if let Some(round) = self.round.as_ref() {
                round.snapshot_into(&mut self.snapshot);
                self.view.render_into(&self.snapshot, viewport, fb);
            }
        }

        let score = self.last_result.as_ref().map(|r| r.score).unwrap_or(0);
        let view = match self.screen {
            Screen::Playing => return,
            Screen::Intro => ScreenView::Intro,
            Screen::Confirm => ScreenView::Confirm,
            Screen::GameOver => ScreenView::GameOver {
                score,
                can_register: self.can_register(),
            },
            Screen::NameEntry => ScreenView::NameEntry {
                score,
                input: &self.name_input,
                error: self.name_error.map(name_error_text),
            },
            Screen::Leaderboard { after_register } => ScreenView::Leaderboard {
                entries: self.board.entries(),
                highlight: self.highlight,
                after_register,
            },
        };
        render_screen(&view, viewport, fb);
    }
}

fn name_error_text(e: NameError) -> &'static str {
    match e {
        NameError::Empty => "please enter a name",
        NameError::TooLong { .. } => "8 characters at most",
    }
}
