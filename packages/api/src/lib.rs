//! # API crate: the marketplace REST backend over HTTP
//!
//! [`HttpBackend`] implements [`market::MarketBackend`] with `reqwest`. Every
//! endpoint answers a JSON object carrying `success` plus either a payload
//! field or a `message`; [`envelope`] turns those objects into
//! `MarketResult`s so the dispatcher never sees raw JSON.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `HttpBackend`: URL building, requests, multipart upload |
//! | [`envelope`] | Decoding of the `{success, message, …}` reply shape |
//!
//! On native targets the client keeps its own cookie jar and reads the API
//! origin from `MARKET_API_URL` (a `.env` file is honoured). In the browser
//! the page's cookies carry the session and the origin comes from the page.

pub mod client;
pub mod envelope;

pub use client::HttpBackend;
