/**
 * WhatsHub - WhatsApp Marketing Dashboard Backend
 *
 * A REST backend for a WhatsApp-style marketing dashboard: contacts,
 * one-to-one chat with a keyword auto-reply bot, spreadsheet-driven bulk
 * campaigns, broadcast channels, communities, ephemeral status updates,
 * and a simulated message-delivery lifecycle that advances message
 * statuses through `sent → delivered → read` with background tasks.
 */
pub mod auth;
pub mod campaigns;
pub mod channels;
pub mod chat;
pub mod communities;
pub mod contacts;
pub mod error;
pub mod middleware;
pub mod profile;
pub mod routes;
pub mod server;
pub mod settings;
pub mod sheets;
pub mod simulation;
pub mod status_updates;
pub mod templates;
