//! Application pages

pub mod about;
pub mod chatbot;
pub mod detect;
pub mod features;
pub mod home;
pub mod login;
pub mod planner;
pub mod profile;
pub mod register;
