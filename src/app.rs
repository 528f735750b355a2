//! App — owns every state machine and performs the effects they request.
//!
//! This is the only place where timers are armed, notifications are sent
//! and the reply producer is called. Time only moves when the owner calls
//! [`App::advance`] or [`App::advance_to`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::AppConfig;
use crate::content::Catalog;
use crate::effect::{Effect, Notice, TimerEvent};
use crate::notify::{Notification, Notifier};
use crate::shell::{AppPhase, ExploreFilter, ExploreState, ShellEvent, ShellState, ShellView, Tab};
use crate::stylebot::{AssistantConversation, CannedReply, Message, ReplyProducer};
use crate::timer::TimerQueue;

/// The headless application.
pub struct App {
    catalog: Catalog,
    shell: ShellState,
    conversation: AssistantConversation,
    timers: TimerQueue<TimerEvent>,
    notifier: Arc<dyn Notifier>,
    replies: Arc<dyn ReplyProducer>,
    torn_down: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        catalog: Catalog,
        notifier: Arc<dyn Notifier>,
        replies: Arc<dyn ReplyProducer>,
    ) -> Self {
        let shell = ShellState::new(config.splash_delay, catalog.slide_count());
        let conversation = AssistantConversation::new(catalog.greeting.clone(), config.reply_delay)
            .with_quick_prompts(catalog.quick_prompts.clone());
        Self {
            catalog,
            shell,
            conversation,
            timers: TimerQueue::new(),
            notifier,
            replies,
            torn_down: false,
        }
    }

    /// App whose assistant answers with the catalog's canned reply.
    pub fn with_canned_replies(
        config: &AppConfig,
        catalog: Catalog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let replies = Arc::new(CannedReply::new(catalog.canned_reply.clone()));
        Self::new(config, catalog, notifier, replies)
    }

    // ── Read-only state ─────────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn phase(&self) -> AppPhase {
        self.shell.phase()
    }

    pub fn tab(&self) -> Tab {
        self.shell.tab()
    }

    pub fn upload_open(&self) -> bool {
        self.shell.upload_open()
    }

    pub fn view(&self) -> ShellView {
        self.shell.view(&self.catalog.brand)
    }

    pub fn explore(&self) -> &ExploreState {
        self.shell.explore()
    }

    pub fn conversation(&self) -> &AssistantConversation {
        &self.conversation
    }

    pub fn transcript(&self) -> &[Message] {
        self.conversation.transcript()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the next timer is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // ── Shell actions ───────────────────────────────────────────────

    /// Show the splash and arm its timer.
    pub fn start(&mut self) {
        self.dispatch(ShellEvent::Start);
    }

    pub fn advance_phase(&mut self) {
        self.dispatch(ShellEvent::AdvancePhase);
    }

    pub fn onboarding_next(&mut self) {
        self.dispatch(ShellEvent::OnboardingNext);
    }

    pub fn onboarding_skip(&mut self) {
        self.dispatch(ShellEvent::OnboardingSkip);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.dispatch(ShellEvent::SelectTab(tab));
    }

    pub fn back(&mut self) {
        self.dispatch(ShellEvent::Back);
    }

    pub fn open_upload(&mut self) {
        self.dispatch(ShellEvent::OpenUpload);
    }

    pub fn close_upload(&mut self) {
        self.dispatch(ShellEvent::CloseUpload);
    }

    pub fn submit_upload(&mut self) {
        self.dispatch(ShellEvent::SubmitUpload);
    }

    pub fn tap_insight(&mut self) {
        self.dispatch(ShellEvent::TapInsight);
    }

    pub fn select_filter(&mut self, filter: ExploreFilter) {
        self.dispatch(ShellEvent::SelectFilter(filter));
    }

    /// Tap the `index`-th hashtag chip of the catalog. Returns `false` for an
    /// unknown index.
    pub fn select_hashtag(&mut self, index: usize) -> bool {
        let Some(tag) = self.catalog.hashtags.get(index).cloned() else {
            return false;
        };
        self.dispatch(ShellEvent::SelectHashtag(tag));
        true
    }

    // ── Chat actions (assistant tab only) ───────────────────────────

    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.chat_active("set_input") {
            self.conversation.set_input(text);
        }
    }

    pub fn use_quick_prompt(&mut self, index: usize) -> bool {
        self.chat_active("use_quick_prompt") && self.conversation.use_quick_prompt(index)
    }

    /// Submit the input buffer.
    pub fn send(&mut self) {
        if self.chat_active("send") {
            let effects = self.conversation.send();
            self.apply(effects);
        }
    }

    pub fn submit(&mut self, text: &str) {
        if self.chat_active("submit") {
            let effects = self.conversation.submit(text);
            self.apply(effects);
        }
    }

    fn chat_active(&self, action: &str) -> bool {
        // The upload sheet covers the chat while it is open.
        let active = !self.torn_down
            && self.shell.phase() == AppPhase::Main
            && self.shell.tab() == Tab::StyleBot
            && !self.shell.upload_open();
        if !active {
            debug!(
                action,
                tab = %self.shell.tab(),
                upload_open = self.shell.upload_open(),
                "Chat input ignored, assistant not reachable"
            );
        }
        active
    }

    // ── Time ────────────────────────────────────────────────────────

    /// Move virtual time forward by `by`, firing due timers in order.
    pub async fn advance(&mut self, by: Duration) {
        let target = self.timers.now() + by;
        self.advance_to(target).await;
    }

    /// Move virtual time forward to `target`, firing due timers in order.
    pub async fn advance_to(&mut self, target: Duration) {
        if self.torn_down {
            return;
        }
        while let Some(event) = self.timers.pop_due(target) {
            self.fire(event).await;
        }
        self.timers.advance_to(target);
    }

    async fn fire(&mut self, event: TimerEvent) {
        debug!(?event, at_ms = self.timers.now().as_millis() as u64, "Timer fired");
        match event {
            TimerEvent::SplashElapsed => self.dispatch(ShellEvent::SplashElapsed),
            TimerEvent::ReplyDue(ticket) => {
                if !self.conversation.is_pending(ticket) {
                    debug!(seq = ticket.seq, "Reply timer for a torn-down conversation");
                    return;
                }
                let replies = Arc::clone(&self.replies);
                let draft = replies.reply(self.conversation.transcript()).await;
                debug!(producer = replies.name(), "Reply produced");
                self.conversation.deliver(ticket, draft);
            }
        }
    }

    /// Cancel every timer and stop accepting input.
    pub fn shutdown(&mut self) {
        if self.torn_down {
            return;
        }
        let cancelled = self.timers.len();
        let effects = self.conversation.reset();
        self.apply(effects);
        self.timers.clear();
        self.torn_down = true;
        info!(cancelled, "App shut down");
    }

    // ── Effects ─────────────────────────────────────────────────────

    fn dispatch(&mut self, event: ShellEvent) {
        if self.torn_down {
            debug!(?event, "Event after shutdown ignored");
            return;
        }
        let effects = self.shell.reduce(event);
        self.apply(effects);
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Schedule { after, event } => {
                    self.timers.schedule_after(after, event);
                }
                Effect::Cancel(event) => {
                    self.timers.cancel_matching(|pending| *pending == event);
                }
                Effect::Notify(notice) => self.notify(notice),
                Effect::ResetConversation => queue.extend(self.conversation.reset()),
            }
        }
    }

    fn notify(&self, notice: Notice) {
        let message = self.catalog.notice_text(notice);
        let notification = match notice {
            Notice::UploadShared => Notification::success(message),
            Notice::InsightTapped => Notification::info(message),
        };
        self.notifier.notify(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;

    fn app() -> (App, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let app = App::with_canned_replies(
            &AppConfig::default(),
            Catalog::builtin().unwrap(),
            notifier.clone(),
        );
        (app, notifier)
    }

    #[tokio::test]
    async fn splash_timer_moves_to_onboarding_after_two_seconds() {
        let (mut app, _) = app();
        app.start();
        app.advance(Duration::from_millis(1999)).await;
        assert_eq!(app.phase(), AppPhase::Splash);
        app.advance(Duration::from_millis(1)).await;
        assert_eq!(app.phase(), AppPhase::Onboarding);
        assert_eq!(app.pending_timers(), 0);
    }

    #[tokio::test]
    async fn early_advance_cancels_splash_timer() {
        let (mut app, _) = app();
        app.start();
        app.advance_phase();
        assert_eq!(app.pending_timers(), 0);
        app.advance(Duration::from_secs(5)).await;
        assert_eq!(app.phase(), AppPhase::Onboarding);
    }

    #[tokio::test]
    async fn chat_is_ignored_off_the_assistant_tab() {
        let (mut app, _) = app();
        app.start();
        app.advance_phase();
        app.onboarding_skip();
        app.submit("hello");
        assert_eq!(app.transcript().len(), 1);
        assert_eq!(app.pending_timers(), 0);
    }

    #[tokio::test]
    async fn upload_notification_uses_catalog_text() {
        let (mut app, notifier) = app();
        app.start();
        app.advance_phase();
        app.onboarding_skip();
        app.open_upload();
        app.submit_upload();

        let seen = notifier.notifications();
        assert_eq!(seen, vec![Notification::success("Gönderiniz başarıyla paylaşıldı!")]);
        assert!(!app.upload_open());
    }

    fn main_app() -> (App, Arc<RecordingNotifier>) {
        let (mut app, notifier) = app();
        app.start();
        app.advance_phase();
        app.onboarding_skip();
        (app, notifier)
    }

    #[tokio::test]
    async fn chat_is_blocked_under_the_upload_sheet() {
        let (mut app, _) = main_app();
        app.select_tab(Tab::StyleBot);
        app.open_upload();
        app.submit("hi");
        app.set_input("draft");
        app.advance(Duration::from_millis(1000)).await;
        assert!(app.upload_open());
        assert_eq!(app.transcript().len(), 1);
        assert_eq!(app.conversation().input(), "");

        app.close_upload();
        app.submit("hi");
        app.advance(Duration::from_millis(1000)).await;
        assert_eq!(app.transcript().len(), 3);
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_replies_through_effects() {
        let (mut app, _) = main_app();
        app.select_tab(Tab::StyleBot);
        app.submit("one");
        app.submit("two");
        assert_eq!(app.pending_timers(), 2);

        app.shutdown();
        assert_eq!(app.pending_timers(), 0);
        assert_eq!(app.conversation().pending_replies(), 0);
        assert_eq!(app.transcript().len(), 1);
    }

    #[tokio::test]
    async fn hashtag_index_resolves_against_catalog() {
        let (mut app, _) = main_app();
        app.select_tab(Tab::Explore);
        assert!(app.select_hashtag(2));
        assert_eq!(app.explore().hashtag.as_deref(), Some("#minimal"));
        assert!(!app.select_hashtag(99));
        assert_eq!(app.explore().hashtag.as_deref(), Some("#minimal"));
    }

    #[tokio::test]
    async fn shutdown_cancels_splash_timer() {
        let (mut app, _) = app();
        app.start();
        app.shutdown();
        assert_eq!(app.pending_timers(), 0);
        app.advance(Duration::from_secs(10)).await;
        assert_eq!(app.phase(), AppPhase::Splash);
        app.advance_phase();
        assert_eq!(app.phase(), AppPhase::Splash, "Input after shutdown is ignored");
    }
}
