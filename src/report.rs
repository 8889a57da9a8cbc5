// src/report.rs
use crate::message::Message;
use std::collections::BTreeMap;
use std::io::{self, Write};

pub type TopicCounts = BTreeMap<String, usize>;

/// Topic frequency tables built from a fetched result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicReport {
    pub per_user: BTreeMap<String, TopicCounts>,
    pub distribution: TopicCounts,
    pub total_messages: usize,
}

impl TopicReport {
    pub fn from_messages(messages: &[Message]) -> Self {
        let mut report = TopicReport::default();
        for msg in messages {
            *report
                .per_user
                .entry(msg.user_id.clone())
                .or_default()
                .entry(msg.topic.clone())
                .or_insert(0) += 1;
            *report.distribution.entry(msg.topic.clone()).or_insert(0) += 1;
            report.total_messages += 1;
        }
        report
    }

    pub fn total_users(&self) -> usize {
        self.per_user.len()
    }

    pub fn user_total(&self, user: &str) -> usize {
        self.per_user.get(user).map(|t| t.values().sum()).unwrap_or(0)
    }

    /// A user's topics, most frequent first.
    pub fn ranked_topics(&self, user: &str) -> Vec<(&str, usize)> {
        self.per_user.get(user).map(rank).unwrap_or_default()
    }

    pub fn ranked_distribution(&self) -> Vec<(&str, usize)> {
        rank(&self.distribution)
    }

    pub fn write_frequencies<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nTopic frequency per user:")?;
        writeln!(out, "{}", "-".repeat(60))?;
        for user in self.per_user.keys() {
            writeln!(out, "\n{}:", user)?;
            for (topic, count) in self.ranked_topics(user) {
                writeln!(out, "  - {}: {} {}", topic, count, plural(count))?;
            }
        }
        Ok(())
    }

    pub fn write_statistics<W: Write>(&self, out: &mut W, topics: &[String]) -> io::Result<()> {
        writeln!(out, "\n{}", banner())?;
        writeln!(out, "GENERAL STATISTICS")?;
        writeln!(out, "{}", banner())?;
        writeln!(out, "Total users: {}", self.total_users())?;
        writeln!(out, "Total messages: {}", self.total_messages)?;
        writeln!(out, "Available topics: {}", topics.join(", "))?;

        writeln!(out, "\nMessages per topic:")?;
        for (topic, count) in self.ranked_distribution() {
            writeln!(out, "  - {}: {} {}", topic, count, plural(count))?;
        }
        Ok(())
    }
}

pub fn banner() -> String {
    "=".repeat(60)
}

fn rank(counts: &TopicCounts) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(t, c)| (t.as_str(), *c)).collect();
    // BTreeMap order already breaks ties by name; the sort is stable.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "message"
    } else {
        "messages"
    }
}
