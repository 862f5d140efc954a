//! Dialogue controller — routes each inbound update to the registration
//! flow or the Q&A flow.

use std::sync::Arc;

use chrono::Utc;

use crate::astro::gateway::{ChartProvider, fetch_chart};
use crate::astro::geocode::PlaceResolver;
use crate::astro::normalize;
use crate::channels::MessageSender;
use crate::dialogue::prompts;
use crate::dialogue::state::{DialogueStep, Session};
use crate::qa::classifier::classify;
use crate::qa::synthesizer;
use crate::store::{BirthProfile, ChartCache, ChartRecord, SessionStore};

/// The restart command: discards any in-flight dialogue.
const RESTART_COMMAND: &str = "/start";

/// Coordinates sessions, registration, and question answering for all chats.
pub struct DialogueController {
    sessions: SessionStore,
    cache: ChartCache,
    provider: Arc<dyn ChartProvider>,
    resolver: Arc<dyn PlaceResolver>,
    sender: Arc<dyn MessageSender>,
}

impl DialogueController {
    pub fn new(
        sessions: SessionStore,
        cache: ChartCache,
        provider: Arc<dyn ChartProvider>,
        resolver: Arc<dyn PlaceResolver>,
        sender: Arc<dyn MessageSender>,
    ) -> Self {
        Self {
            sessions,
            cache,
            provider,
            resolver,
            sender,
        }
    }

    /// Read access to the chart cache.
    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Handle one inbound update.
    ///
    /// Updates without a chat id or with empty text are accepted and
    /// ignored. The whole turn runs under the chat's turn lock, so two
    /// updates for one chat never interleave.
    pub async fn handle_update(&self, chat_id: Option<i64>, text: &str) {
        let Some(chat_id) = chat_id else {
            return;
        };
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let lock = self.sessions.turn_lock(chat_id).await;
        let _turn = lock.lock().await;

        if text == RESTART_COMMAND {
            self.sessions.insert(Session::start(chat_id)).await;
            self.send(chat_id, prompts::NAME_PROMPT).await;
            return;
        }

        match self.sessions.get(chat_id).await {
            Some(session) => self.advance_dialogue(session, text).await,
            None => self.answer_question(chat_id, text).await,
        }
    }

    /// Store the input for the current step, advance, and prompt — or run
    /// the registration pipeline once the place arrives.
    ///
    /// Date and time inputs are validated here: a parse failure re-prompts
    /// the same step and leaves the session untouched.
    async fn advance_dialogue(&self, mut session: Session, text: &str) {
        let chat_id = session.chat_id;
        match session.step {
            DialogueStep::CollectingName => {
                session.draft.name = Some(text.to_string());
            }
            DialogueStep::CollectingDob => {
                if let Err(e) = normalize::parse_date(text) {
                    tracing::debug!(chat_id, error = %e, "re-prompting date");
                    self.send(chat_id, prompts::DOB_REPROMPT).await;
                    return;
                }
                session.draft.dob = Some(text.to_string());
            }
            DialogueStep::CollectingTime => {
                if let Err(e) = normalize::parse_time(text) {
                    tracing::debug!(chat_id, error = %e, "re-prompting time");
                    self.send(chat_id, prompts::TIME_REPROMPT).await;
                    return;
                }
                session.draft.time_of_birth = Some(text.to_string());
            }
            DialogueStep::CollectingPlace => {
                session.draft.place_of_birth = Some(text.to_string());
                self.complete_registration(session).await;
                return;
            }
            DialogueStep::Idle | DialogueStep::Complete => {
                // Stored sessions are always in a collecting step.
                tracing::warn!(chat_id, step = %session.step, "dropping session in unexpected step");
                self.sessions.remove(chat_id).await;
                return;
            }
        }

        match session.advance() {
            Ok(next) => {
                self.sessions.insert(session).await;
                if let Some(prompt) = prompts::prompt_for(next) {
                    self.send(chat_id, prompt).await;
                }
            }
            Err(e) => tracing::warn!(chat_id, error = %e, "failed to advance dialogue"),
        }
    }

    /// Registration pipeline: normalize → fetch chart → overwrite cache →
    /// summary.
    ///
    /// Remote failures degrade to defaults or failure markers; the
    /// pipeline always reaches the summary and clears the session.
    async fn complete_registration(&self, session: Session) {
        let chat_id = session.chat_id;
        self.send(chat_id, prompts::FETCHING).await;

        let draft = session.draft;
        let (Some(name), Some(dob), Some(time), Some(place)) = (
            draft.name,
            draft.dob,
            draft.time_of_birth,
            draft.place_of_birth,
        ) else {
            // A hole in the draft means the dialogue state was corrupted.
            tracing::warn!(chat_id, "incomplete draft at place step, restarting dialogue");
            self.sessions.insert(Session::start(chat_id)).await;
            self.send(chat_id, prompts::NAME_PROMPT).await;
            return;
        };

        let built = normalize::build_payload(&dob, &time, &place, self.resolver.as_ref()).await;
        let (payload, geocode) = match built {
            Ok(built) => built,
            Err(e) => {
                // Date and time were validated at collection; a failure
                // here means the stored draft no longer parses.
                tracing::warn!(chat_id, error = %e, "stored birth data failed to normalize");
                self.sessions.remove(chat_id).await;
                self.send(chat_id, prompts::REGISTER_FIRST).await;
                return;
            }
        };

        let snapshot = fetch_chart(self.provider.as_ref(), &payload).await;
        let summary = prompts::registration_summary(&snapshot);

        let record = ChartRecord {
            profile: BirthProfile {
                name,
                dob,
                time_of_birth: time,
                place_of_birth: place,
                payload,
                geocode,
            },
            snapshot,
            cached_at: Utc::now(),
        };
        self.cache.put(chat_id, record).await;
        self.sessions.remove(chat_id).await;

        tracing::info!(chat_id, "registration complete");
        self.send(chat_id, &summary).await;
    }

    /// Q&A branch: classify, optionally announce the supplementary lookup,
    /// and reply from the cached chart.
    async fn answer_question(&self, chat_id: i64, text: &str) {
        let Some(record) = self.cache.get(chat_id).await else {
            self.send(chat_id, prompts::REGISTER_FIRST).await;
            return;
        };

        let category = classify(text);
        tracing::debug!(chat_id, %category, "classified question");

        if category.endpoint().is_some() {
            self.send(chat_id, &format!("🔍 Analyzing your {category}..."))
                .await;
        }

        let reply = synthesizer::answer(self.provider.as_ref(), &record, category).await;
        self.send(chat_id, &reply).await;
    }

    /// Best-effort outbound send; failures are logged and dropped.
    async fn send(&self, chat_id: i64, text: &str) {
        if let Err(e) = self.sender.send(chat_id, text).await {
            tracing::warn!(chat_id, error = %e, "failed to send message");
        }
    }
}
