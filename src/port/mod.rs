//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the dashboard core and the outside world:
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │  Store + Orchestrator    │
//!                 └──────────────────────────┘
//!                    │          │          │
//!                    ▼          ▼          ▼
//!             ┌───────────┐ ┌─────────┐ ┌────────────┐
//!             │ListingApi │ │Notifier │ │Permission  │
//!             │  (REST)   │ │ (sinks) │ │   Gate     │
//!             └───────────┘ └─────────┘ └────────────┘
//! ```

pub mod outbound;
