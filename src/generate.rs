// src/generate.rs
use crate::error::ProfileError;
use crate::message::Message;
use crate::profile::SeedProfile;
use crate::template::{build_environment, render_message_text};

use chrono::{Local, NaiveDateTime, TimeDelta};
use minijinja::Environment;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn user_id(n: usize) -> String {
    format!("user_{:03}", n)
}

pub fn message_id(n: usize) -> String {
    format!("msg_{:03}", n)
}

/// Produces synthetic messages from a [`SeedProfile`].
pub struct Generator<'a> {
    profile: &'a SeedProfile,
    env: Environment<'static>,
    rng: StdRng,
    base: NaiveDateTime,
}

impl<'a> Generator<'a> {
    pub fn new(profile: &'a SeedProfile, seed: Option<u64>) -> Result<Self, ProfileError> {
        profile.validate()?;
        let base = TimeDelta::try_days(profile.window_days)
            .and_then(|window| Local::now().naive_local().checked_sub_signed(window))
            .ok_or_else(|| out_of_range(profile.window_days))?;
        Self::with_base(profile, seed, base)
    }

    /// Like [`Generator::new`] but with an explicit start of the timestamp window.
    /// The profile is validated first.
    pub fn with_base(
        profile: &'a SeedProfile,
        seed: Option<u64>,
        base: NaiveDateTime,
    ) -> Result<Self, ProfileError> {
        profile.validate()?;
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Generator {
            profile,
            env: build_environment(&profile.text_format)?,
            rng,
            base,
        })
    }

    pub fn generate(&mut self, count: usize) -> Result<Vec<Message>, ProfileError> {
        let users: Vec<String> = (1..=self.profile.users).map(user_id).collect();
        let ages: HashMap<&str, i32> = users
            .iter()
            .map(|u| (u.as_str(), self.rng.gen_range(self.profile.min_age..=self.profile.max_age)))
            .collect();

        let mut messages = Vec::with_capacity(count);
        for i in 1..=count {
            let user = pick(&users, &mut self.rng, "user")?;
            let topic = pick(&self.profile.topics, &mut self.rng, "topic")?;
            let text = pick(&self.profile.templates, &mut self.rng, "message template")?;
            let offset = TimeDelta::try_days(self.rng.gen_range(0..=self.profile.window_days))
                .and_then(|d| d.checked_add(&TimeDelta::try_hours(self.rng.gen_range(0..=23))?))
                .and_then(|d| d.checked_add(&TimeDelta::try_minutes(self.rng.gen_range(0..=59))?))
                .ok_or_else(|| out_of_range(self.profile.window_days))?;
            let timestamp = self
                .base
                .checked_add_signed(offset)
                .ok_or_else(|| out_of_range(self.profile.window_days))?;

            messages.push(Message {
                id: message_id(i),
                user_id: user.clone(),
                user_age: ages[user.as_str()],
                topic: topic.clone(),
                message_text: render_message_text(&self.env, text, topic, user)?,
                timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            });
        }
        Ok(messages)
    }
}

fn pick<'v>(values: &'v [String], rng: &mut StdRng, what: &str) -> Result<&'v String, ProfileError> {
    values
        .choose(rng)
        .ok_or_else(|| ProfileError::Invalid(format!("no {} to choose from", what)))
}

fn out_of_range(window_days: i64) -> ProfileError {
    ProfileError::Invalid(format!("timestamp window of {} days is out of range", window_days))
}
