//! Shell state machine — phase, active tab, upload overlay and the
//! Explore screen's filter.
//!
//! `reduce` is a total function: every event is accepted in every state.
//! Events that make no sense in the current phase are ignored.

use std::num::NonZeroUsize;
use std::time::Duration;

use tracing::{debug, info};

use crate::effect::{Effect, Notice, TimerEvent};
use crate::onboarding::{OnboardingSequencer, Progress};

use super::explore::{ExploreFilter, ExploreState};
use super::phase::AppPhase;
use super::tab::Tab;
use super::view::{HeaderView, MainView, ShellView};

/// Input to the shell state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellEvent {
    /// Show the splash screen and arm its timer.
    Start,
    /// The splash timer fired.
    SplashElapsed,
    /// Move to the next phase, if there is one.
    AdvancePhase,
    /// "Continue" on an onboarding slide.
    OnboardingNext,
    /// "I already have an account".
    OnboardingSkip,
    SelectTab(Tab),
    /// Back button on secondary screens.
    Back,
    OpenUpload,
    CloseUpload,
    SubmitUpload,
    /// The AI insight chip on a feed card.
    TapInsight,
    /// Filter button on the Explore screen.
    SelectFilter(ExploreFilter),
    /// Hashtag chip on the Explore screen.
    SelectHashtag(String),
}

/// Navigation state of the whole app.
#[derive(Debug, Clone)]
pub struct ShellState {
    phase: AppPhase,
    started: bool,
    splash_delay: Duration,
    slide_count: NonZeroUsize,
    onboarding: Option<OnboardingSequencer>,
    tab: Tab,
    upload_open: bool,
    explore: ExploreState,
}

impl ShellState {
    pub fn new(splash_delay: Duration, slide_count: NonZeroUsize) -> Self {
        Self {
            phase: AppPhase::default(),
            started: false,
            splash_delay,
            slide_count,
            onboarding: None,
            tab: Tab::default(),
            upload_open: false,
            explore: ExploreState::default(),
        }
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn upload_open(&self) -> bool {
        self.upload_open
    }

    pub fn explore(&self) -> &ExploreState {
        &self.explore
    }

    /// The live sequencer while onboarding.
    pub fn onboarding(&self) -> Option<&OnboardingSequencer> {
        self.onboarding.as_ref()
    }

    /// Apply one event and return the effects it requests.
    pub fn reduce(&mut self, event: ShellEvent) -> Vec<Effect> {
        match event {
            ShellEvent::Start => self.start(),
            ShellEvent::SplashElapsed => {
                if self.phase == AppPhase::Splash {
                    self.advance_phase()
                } else {
                    debug!(phase = %self.phase, "Stale splash timer ignored");
                    Vec::new()
                }
            }
            ShellEvent::AdvancePhase => self.advance_phase(),
            ShellEvent::OnboardingNext => self.onboarding_step(OnboardingSequencer::next),
            ShellEvent::OnboardingSkip => self.onboarding_step(OnboardingSequencer::skip),
            ShellEvent::SelectTab(tab) => self.select_tab(tab),
            ShellEvent::Back => match self.tab.back_target() {
                Some(target) => self.select_tab(target),
                None => Vec::new(),
            },
            ShellEvent::OpenUpload => {
                if self.in_main("open_upload") {
                    self.upload_open = true;
                }
                Vec::new()
            }
            ShellEvent::CloseUpload => {
                self.upload_open = false;
                Vec::new()
            }
            ShellEvent::SubmitUpload => {
                if !self.in_main("submit_upload") || !self.upload_open {
                    return Vec::new();
                }
                self.upload_open = false;
                info!("Upload submitted");
                vec![Effect::Notify(Notice::UploadShared)]
            }
            ShellEvent::TapInsight => {
                if self.in_main("tap_insight") {
                    vec![Effect::Notify(Notice::InsightTapped)]
                } else {
                    Vec::new()
                }
            }
            ShellEvent::SelectFilter(filter) => {
                if self.on_explore("select_filter") {
                    self.explore.select_filter(filter);
                    debug!(%filter, "Explore filter selected");
                }
                Vec::new()
            }
            ShellEvent::SelectHashtag(tag) => {
                if self.on_explore("select_hashtag") && !self.explore.select_hashtag(tag) {
                    debug!(filter = %self.explore.filter, "No hashtag chips under this filter");
                }
                Vec::new()
            }
        }
    }

    fn start(&mut self) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        info!(phase = %self.phase, "App started");
        if self.phase != AppPhase::Splash {
            return Vec::new();
        }
        vec![Effect::Schedule {
            after: self.splash_delay,
            event: TimerEvent::SplashElapsed,
        }]
    }

    fn advance_phase(&mut self) -> Vec<Effect> {
        let Some(next) = self.phase.next() else {
            debug!("advance_phase in terminal phase ignored");
            return Vec::new();
        };
        let from = self.phase;
        self.phase = next;
        info!(from = %from, to = %next, "Phase transition");

        match next {
            AppPhase::Onboarding => {
                self.onboarding = Some(OnboardingSequencer::new(self.slide_count));
                // A manual advance beats the splash timer to it.
                vec![Effect::Cancel(TimerEvent::SplashElapsed)]
            }
            AppPhase::Main => {
                self.onboarding = None;
                self.tab = Tab::Home;
                self.upload_open = false;
                self.explore = ExploreState::default();
                Vec::new()
            }
            AppPhase::Splash => Vec::new(),
        }
    }

    fn onboarding_step(&mut self, action: fn(&mut OnboardingSequencer) -> Progress) -> Vec<Effect> {
        let Some(sequencer) = self.onboarding.as_mut() else {
            debug!(phase = %self.phase, "Onboarding input outside onboarding ignored");
            return Vec::new();
        };
        match action(sequencer) {
            Progress::Completed => self.advance_phase(),
            Progress::Advanced(_) | Progress::Finished => Vec::new(),
        }
    }

    fn select_tab(&mut self, tab: Tab) -> Vec<Effect> {
        if !self.in_main("select_tab") {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.tab, tab);
        if previous != tab {
            debug!(from = %previous, to = %tab, "Tab selected");
        }
        if previous == Tab::Explore && tab != Tab::Explore {
            self.explore = ExploreState::default();
        }
        if previous == Tab::StyleBot && tab != Tab::StyleBot {
            vec![Effect::ResetConversation]
        } else {
            Vec::new()
        }
    }

    fn on_explore(&self, action: &str) -> bool {
        if self.phase == AppPhase::Main && self.tab == Tab::Explore {
            true
        } else {
            debug!(action, phase = %self.phase, tab = %self.tab, "Ignored off the Explore tab");
            false
        }
    }

    fn in_main(&self, action: &str) -> bool {
        if self.phase == AppPhase::Main {
            true
        } else {
            debug!(action, phase = %self.phase, "Ignored outside main phase");
            false
        }
    }

    /// Read-only snapshot for the presentation layer.
    pub fn view(&self, brand: &str) -> ShellView {
        match self.phase {
            AppPhase::Splash => ShellView::Splash,
            AppPhase::Onboarding => match &self.onboarding {
                Some(seq) => ShellView::Onboarding {
                    step: seq.step(),
                    len: seq.len(),
                    is_last: seq.is_last(),
                },
                None => ShellView::Splash,
            },
            AppPhase::Main => {
                let header = self.tab.shows_header().then(|| HeaderView {
                    title: if self.tab == Tab::Home {
                        brand.to_string()
                    } else {
                        self.tab.title()
                    },
                    show_search: self.tab.shows_search(),
                });
                ShellView::Main(MainView {
                    tab: self.tab,
                    header,
                    show_back: self.tab.back_target().is_some(),
                    show_bot_shortcut: self.tab.shows_bot_shortcut(),
                    upload_open: self.upload_open,
                    explore: (self.tab == Tab::Explore).then(|| self.explore.clone()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPLASH: Duration = Duration::from_millis(2000);

    fn shell() -> ShellState {
        ShellState::new(SPLASH, NonZeroUsize::new(3).unwrap())
    }

    fn main_shell() -> ShellState {
        let mut s = shell();
        s.reduce(ShellEvent::Start);
        s.reduce(ShellEvent::AdvancePhase);
        s.reduce(ShellEvent::AdvancePhase);
        assert_eq!(s.phase(), AppPhase::Main);
        s
    }

    #[test]
    fn start_schedules_splash_timer_once() {
        let mut s = shell();
        assert_eq!(
            s.reduce(ShellEvent::Start),
            vec![Effect::Schedule {
                after: SPLASH,
                event: TimerEvent::SplashElapsed
            }]
        );
        assert!(s.reduce(ShellEvent::Start).is_empty());
        assert_eq!(s.phase(), AppPhase::Splash);
    }

    #[test]
    fn splash_elapsed_enters_onboarding_at_step_zero() {
        let mut s = shell();
        s.reduce(ShellEvent::Start);
        s.reduce(ShellEvent::SplashElapsed);
        assert_eq!(s.phase(), AppPhase::Onboarding);
        assert_eq!(s.onboarding().unwrap().step(), 0);
    }

    #[test]
    fn manual_advance_cancels_splash_timer() {
        let mut s = shell();
        s.reduce(ShellEvent::Start);
        assert_eq!(
            s.reduce(ShellEvent::AdvancePhase),
            vec![Effect::Cancel(TimerEvent::SplashElapsed)]
        );
    }

    #[test]
    fn stale_splash_timer_is_ignored() {
        let mut s = shell();
        s.reduce(ShellEvent::AdvancePhase);
        assert!(s.reduce(ShellEvent::SplashElapsed).is_empty());
        assert_eq!(s.phase(), AppPhase::Onboarding);
    }

    #[test]
    fn advance_phase_is_monotonic() {
        let mut s = shell();
        let mut seen = vec![s.phase()];
        for _ in 0..5 {
            s.reduce(ShellEvent::AdvancePhase);
            if seen.last() != Some(&s.phase()) {
                seen.push(s.phase());
            }
        }
        assert_eq!(seen, vec![AppPhase::Splash, AppPhase::Onboarding, AppPhase::Main]);
    }

    #[test]
    fn onboarding_completion_enters_main_on_home() {
        let mut s = shell();
        s.reduce(ShellEvent::AdvancePhase);
        s.reduce(ShellEvent::OnboardingNext);
        s.reduce(ShellEvent::OnboardingNext);
        assert_eq!(s.phase(), AppPhase::Onboarding);
        s.reduce(ShellEvent::OnboardingNext);
        assert_eq!(s.phase(), AppPhase::Main);
        assert_eq!(s.tab(), Tab::Home);
        assert!(s.onboarding().is_none(), "Sequencer is discarded");
    }

    #[test]
    fn onboarding_skip_goes_straight_to_main() {
        let mut s = shell();
        s.reduce(ShellEvent::AdvancePhase);
        s.reduce(ShellEvent::OnboardingSkip);
        assert_eq!(s.phase(), AppPhase::Main);
    }

    #[test]
    fn onboarding_input_ignored_outside_onboarding() {
        let mut s = shell();
        s.reduce(ShellEvent::OnboardingSkip);
        assert_eq!(s.phase(), AppPhase::Splash);

        let mut s = main_shell();
        assert!(s.reduce(ShellEvent::OnboardingNext).is_empty());
        assert_eq!(s.phase(), AppPhase::Main);
    }

    #[test]
    fn select_tab_only_in_main() {
        let mut s = shell();
        s.reduce(ShellEvent::SelectTab(Tab::Profile));
        assert_eq!(s.tab(), Tab::Home);

        let mut s = main_shell();
        for tab in Tab::ALL {
            s.reduce(ShellEvent::SelectTab(tab));
            assert_eq!(s.tab(), tab);
        }
    }

    #[test]
    fn leaving_stylebot_resets_conversation() {
        let mut s = main_shell();
        assert!(s.reduce(ShellEvent::SelectTab(Tab::StyleBot)).is_empty());
        assert!(s.reduce(ShellEvent::SelectTab(Tab::StyleBot)).is_empty());
        assert_eq!(
            s.reduce(ShellEvent::SelectTab(Tab::Explore)),
            vec![Effect::ResetConversation]
        );
    }

    #[test]
    fn back_from_stylebot_resets_and_returns_home() {
        let mut s = main_shell();
        s.reduce(ShellEvent::SelectTab(Tab::StyleBot));
        assert_eq!(s.reduce(ShellEvent::Back), vec![Effect::ResetConversation]);
        assert_eq!(s.tab(), Tab::Home);
    }

    #[test]
    fn back_is_noop_on_primary_tabs() {
        let mut s = main_shell();
        s.reduce(ShellEvent::SelectTab(Tab::Profile));
        s.reduce(ShellEvent::Back);
        assert_eq!(s.tab(), Tab::Profile);
    }

    #[test]
    fn close_upload_is_idempotent() {
        let mut s = main_shell();
        s.reduce(ShellEvent::OpenUpload);
        assert!(s.upload_open());
        s.reduce(ShellEvent::CloseUpload);
        s.reduce(ShellEvent::CloseUpload);
        assert!(!s.upload_open());
    }

    #[test]
    fn upload_cannot_open_before_main() {
        let mut s = shell();
        s.reduce(ShellEvent::OpenUpload);
        assert!(!s.upload_open());
    }

    #[test]
    fn submit_upload_notifies_then_closes() {
        let mut s = main_shell();
        s.reduce(ShellEvent::OpenUpload);
        assert_eq!(
            s.reduce(ShellEvent::SubmitUpload),
            vec![Effect::Notify(Notice::UploadShared)]
        );
        assert!(!s.upload_open());
        assert!(s.reduce(ShellEvent::SubmitUpload).is_empty(), "Nothing to submit");
    }

    #[test]
    fn upload_overlay_survives_tab_switch() {
        let mut s = main_shell();
        s.reduce(ShellEvent::OpenUpload);
        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        assert!(s.upload_open());
    }

    #[test]
    fn tap_insight_notifies_in_main() {
        let mut s = main_shell();
        assert_eq!(
            s.reduce(ShellEvent::TapInsight),
            vec![Effect::Notify(Notice::InsightTapped)]
        );
    }

    #[test]
    fn explore_filter_and_hashtag_on_explore_tab() {
        let mut s = main_shell();
        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        s.reduce(ShellEvent::SelectHashtag("#minimal".into()));
        s.reduce(ShellEvent::SelectFilter(ExploreFilter::Users));
        assert_eq!(s.explore().filter, ExploreFilter::Users);
        assert_eq!(s.explore().hashtag.as_deref(), Some("#minimal"));

        s.reduce(ShellEvent::SelectHashtag("#boho".into()));
        assert_eq!(
            s.explore().hashtag.as_deref(),
            Some("#minimal"),
            "No chips under users"
        );
    }

    #[test]
    fn explore_input_ignored_elsewhere() {
        let mut s = shell();
        s.reduce(ShellEvent::SelectFilter(ExploreFilter::Styles));
        assert_eq!(s.explore(), &ExploreState::default());

        let mut s = main_shell();
        s.reduce(ShellEvent::SelectFilter(ExploreFilter::Styles));
        s.reduce(ShellEvent::SelectHashtag("#chic".into()));
        assert_eq!(s.explore(), &ExploreState::default());
    }

    #[test]
    fn leaving_explore_resets_its_state() {
        let mut s = main_shell();
        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        s.reduce(ShellEvent::SelectHashtag("#urban".into()));
        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        assert_eq!(s.explore().hashtag.as_deref(), Some("#urban"));

        s.reduce(ShellEvent::SelectTab(Tab::Profile));
        assert_eq!(s.explore(), &ExploreState::default());
        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        assert_eq!(s.explore().filter, ExploreFilter::Posts);
        assert!(s.explore().hashtag.is_none());
    }

    #[test]
    fn explore_view_only_on_explore_tab() {
        let mut s = main_shell();
        let ShellView::Main(main) = s.view("Feshine") else {
            panic!("Expected main view");
        };
        assert!(main.explore.is_none());

        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        s.reduce(ShellEvent::SelectFilter(ExploreFilter::Styles));
        let ShellView::Main(main) = s.view("Feshine") else {
            panic!("Expected main view");
        };
        assert_eq!(
            main.explore,
            Some(ExploreState {
                filter: ExploreFilter::Styles,
                hashtag: None,
            })
        );
    }

    #[test]
    fn view_reflects_phase_and_chrome() {
        let mut s = shell();
        assert_eq!(s.view("Feshine"), ShellView::Splash);

        s.reduce(ShellEvent::AdvancePhase);
        s.reduce(ShellEvent::OnboardingNext);
        assert_eq!(
            s.view("Feshine"),
            ShellView::Onboarding {
                step: 1,
                len: 3,
                is_last: false
            }
        );

        s.reduce(ShellEvent::OnboardingSkip);
        let ShellView::Main(main) = s.view("Feshine") else {
            panic!("Expected main view");
        };
        let header = main.header.unwrap();
        assert_eq!(header.title, "Feshine");
        assert!(header.show_search);
        assert!(main.show_bot_shortcut);

        s.reduce(ShellEvent::SelectTab(Tab::Explore));
        let ShellView::Main(main) = s.view("Feshine") else {
            panic!("Expected main view");
        };
        let header = main.header.unwrap();
        assert_eq!(header.title, "Explore");
        assert!(!header.show_search);

        s.reduce(ShellEvent::SelectTab(Tab::StyleBot));
        let ShellView::Main(main) = s.view("Feshine") else {
            panic!("Expected main view");
        };
        assert!(main.header.is_none());
        assert!(main.show_back);
        assert!(!main.show_bot_shortcut);
    }
}
