// handlers/mod.rs - Two-tier handler layout
//
// Public (no key) → Protected (X-API-Key shared secret)
//
pub mod public;    // Tier 1: read-only and informational endpoints
pub mod protected; // Tier 2: deck writes, gated by require_api_key

/*
Directory structure:
src/
├── handlers/
│   ├── mod.rs            ← This file
│   ├── public/
│   │   ├── mod.rs
│   │   ├── root.rs       ← GET /, GET /health
│   │   └── decks.rs      ← GET /api/decks[/:name[/flashcards]]
│   └── protected/
│       ├── mod.rs
│       └── decks.rs      ← POST /api/decks
│
└── app.rs                ← Routes wired from handlers::*

The key check is a route layer installed in app.rs, not an extractor, so
protected handlers never see a request that failed the check.
*/
