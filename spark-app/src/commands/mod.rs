// Every command takes the shared state and reports failures as `Err(String)`
pub mod auth;
pub mod bot;
pub mod chat;
pub mod city;
pub mod message;
pub mod user;
