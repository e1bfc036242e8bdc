//! CLI module for voicevars - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for resolving templates,
//! inspecting placeholders and profiles, and preparing session prompts.

pub mod commands;

pub use commands::Cli;
