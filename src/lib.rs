//! # Anveshak: Belief-Driven Hazard-Avoidance Agent
//!
//! The decision engine for an agent moving through a square grid that hides
//! lethal hazards. Pits may be anywhere; a single wumpus lives somewhere and
//! can be shot. The agent only senses local cues (breeze next to a pit,
//! stench next to the wumpus, glitter on the prize) and must pick up the
//! prize and leave through the origin without dying.
//!
//! ## Features
//!
//! - **Exact Inference**: Posterior hazard probabilities by enumerating the
//!   coupled unknowns around each query
//! - **Explored-State Graph**: `(cell, heading)` states linked by the actions
//!   that realise them, grown as the agent moves
//! - **A\* Planning**: Shortest action sequences over explored states
//! - **Risk-Ranked Exploration**: Always step to the least dangerous frontier,
//!   retreat when none is safe enough
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anveshak::{AgentConfig, HuntAgent};
//! use anveshak::core::{AgentView, Percept};
//!
//! fn play(world: &mut impl World) -> anveshak::Result<()> {
//!     let mut agent = HuntAgent::new(AgentConfig::default())?;
//!     while !world.body().is_dead() && !world.body().has_exited() {
//!         let action = agent.next_action(&world.percept(), world.body())?;
//!         world.apply(action);
//!     }
//!     Ok(())
//! }
//!
//! trait World {
//!     type Body: AgentView;
//!     fn body(&self) -> &Self::Body;
//!     fn percept(&self) -> Percept;
//!     fn apply(&mut self, action: anveshak::core::Action);
//! }
//! ```
//!
//! ## Coordinate Frame
//!
//! - **Origin**: `(row 0, col 0)` is the bottom-left cell
//! - **Headings**: East = col + 1, South = row - 1, West = col - 1,
//!   North = row + 1; turning right steps East → South → West → North
//!
//! ## Architecture
//!
//! - [`core`]: Cells, headings, actions and the world contract
//! - [`belief`]: Observation tracking and exact hazard inference
//! - [`graph`]: The explored-state graph and its frontier
//! - [`planning`]: A* search and path-to-action conversion
//! - [`policy`]: The per-step decision loop
//! - [`config`]: Engine parameters, loadable from TOML
//!
//! ## Data Flow
//!
//! ```text
//!        Percept + AgentView
//!               │
//!               ▼
//!     ┌───────────────────┐       ┌───────────────────┐
//!     │ObservationTracker │──────▶│   HazardModel x2  │
//!     │ (cues, safe cells)│       │ (exact inference) │
//!     └───────────────────┘       └─────────┬─────────┘
//!               │                           │ combined risk
//!               ▼                           ▼
//!     ┌───────────────────┐       ┌───────────────────┐
//!     │    StateGraph     │──────▶│     HuntAgent     │──▶ Action
//!     │ (frontier nodes)  │  A*   │  (action queue)   │
//!     └───────────────────┘       └───────────────────┘
//! ```

pub mod belief;
pub mod config;
pub mod core;
pub mod error;
pub mod graph;
pub mod planning;
pub mod policy;

pub use belief::{Belief, HazardKind};
pub use config::AgentConfig;
pub use error::{AnveshakError, Result};
pub use policy::{DecisionPhase, HuntAgent};
