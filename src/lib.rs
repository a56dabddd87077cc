//! Wordsprint - group writing sprints over WhatsApp
//!
//! A chat bot that runs timed writing sprints inside group chats: members
//! join, report word counts and get a summary when the sprint ends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
