/**
 * API Route Configuration
 *
 * Defines every REST endpoint grouped by area. Auth endpoints are public;
 * everything else sits behind the bearer-token middleware.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /auth/register` - User registration
 * - `POST /auth/login` - User login
 * - `GET /auth/me` - Current user info
 *
 * ## Contacts
 * - `POST|GET /contacts`, `PUT|DELETE /contacts/{id}`
 * - `POST /contacts/import` - Import from a published sheet
 *
 * ## Chat
 * - `GET /chat/threads`, `GET /chat/threads/{contact_id}/messages`
 * - `POST /chat/send`, `POST /chat/send-template`
 * - `PATCH /chat/messages/{id}/status`
 *
 * ## Campaigns
 * - `POST|GET /campaigns`, `GET /campaigns/{id}`
 * - `GET /campaigns/{id}/stats`, `GET /campaigns/{id}/contacts`
 *
 * ## Templates, Sheets, Channels, Communities, Profile, Settings, Status
 */
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;

use crate::auth::handlers::{login, me, register};
use crate::campaigns::handlers as campaigns;
use crate::channels::handlers as channels;
use crate::chat::handlers as chat;
use crate::communities::handlers as communities;
use crate::contacts::handlers as contacts;
use crate::middleware::auth::auth_middleware;
use crate::profile::handlers as profile;
use crate::server::state::AppState;
use crate::settings::handlers as settings;
use crate::sheets::handlers as sheets;
use crate::status_updates::handlers as status_updates;
use crate::templates::handlers as templates;

/// Public routes: no bearer token required.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes guarded by the auth middleware.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        // Contacts
        .route(
            "/contacts",
            post(contacts::create_contact).get(contacts::get_contacts),
        )
        .route(
            "/contacts/{contact_id}",
            put(contacts::update_contact).delete(contacts::delete_contact),
        )
        .route("/contacts/import", post(contacts::import_contacts))
        // Chat
        .route("/chat/threads", get(chat::get_chat_threads))
        .route(
            "/chat/threads/{contact_id}/messages",
            get(chat::get_thread_messages),
        )
        .route("/chat/send", post(chat::send_message))
        .route("/chat/send-template", post(chat::send_template_message))
        .route(
            "/chat/messages/{message_id}/status",
            patch(chat::update_message_status),
        )
        // Campaigns
        .route(
            "/campaigns",
            post(campaigns::create_campaign).get(campaigns::get_campaigns),
        )
        .route("/campaigns/{campaign_id}", get(campaigns::get_campaign))
        .route(
            "/campaigns/{campaign_id}/stats",
            get(campaigns::get_campaign_stats),
        )
        .route(
            "/campaigns/{campaign_id}/contacts",
            get(campaigns::get_campaign_contacts),
        )
        // Templates
        .route("/templates", get(templates::get_templates))
        .route("/templates/{template_id}", get(templates::get_template))
        // Sheets
        .route("/sheets/validate", get(sheets::validate_sheet))
        .route("/sheets/preview", get(sheets::preview_sheet))
        // Channels; `/channels/following` must come before `/channels/{id}`
        .route(
            "/channels",
            post(channels::create_channel).get(channels::get_channels),
        )
        .route("/channels/following", get(channels::get_following_channels))
        .route(
            "/channels/{channel_id}",
            get(channels::get_channel).delete(channels::delete_channel),
        )
        .route("/channels/{channel_id}/follow", post(channels::follow_channel))
        .route(
            "/channels/{channel_id}/unfollow",
            delete(channels::unfollow_channel),
        )
        .route(
            "/channels/{channel_id}/messages",
            post(channels::post_channel_message).get(channels::get_channel_messages),
        )
        // Communities; group routes must come before `/communities/{id}`
        .route(
            "/communities",
            post(communities::create_community).get(communities::get_communities),
        )
        .route(
            "/communities/groups/{group_id}/join",
            post(communities::join_group),
        )
        .route(
            "/communities/groups/{group_id}/messages",
            post(communities::send_group_message).get(communities::get_group_messages),
        )
        .route("/communities/{community_id}", get(communities::get_community))
        .route(
            "/communities/{community_id}/groups",
            post(communities::create_group),
        )
        .route(
            "/communities/{community_id}/join",
            post(communities::join_community),
        )
        // Profile and settings
        .route(
            "/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route(
            "/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        // Status updates
        .route(
            "/status",
            post(status_updates::create_status).get(status_updates::get_statuses),
        )
        .route(
            "/status/{status_id}",
            get(status_updates::get_status).delete(status_updates::delete_status),
        )
        .route_layer(from_fn_with_state(state, auth_middleware))
}
