//! Scripted hazard world for driving `HuntAgent` end to end.
//!
//! The world owns the agent's body, applies actions and produces percepts.
//! Scoring: -1 per action, -10 per attack, -1000 for dying, +1000 for leaving
//! with the prize.

#![allow(dead_code)]

use std::collections::HashSet;

use anveshak::core::{Action, AgentView, Cell, GridSpec, Heading, Percept, State};
use anveshak::{AgentConfig, HuntAgent, Result};
use rand::Rng;
use rand::rngs::StdRng;

/// Upper bound on actions in one episode before the harness gives up.
pub const MAX_STEPS: usize = 1_000;

/// The agent's body as seen by the engine.
#[derive(Clone, Debug)]
pub struct Body {
    pub state: State,
    pub charges: u32,
    pub dead: bool,
    pub exited: bool,
    pub score: i64,
}

impl AgentView for Body {
    fn location(&self) -> Cell {
        self.state.cell
    }

    fn heading(&self) -> Heading {
        self.state.heading
    }

    fn attack_charges(&self) -> u32 {
        self.charges
    }

    fn is_dead(&self) -> bool {
        self.dead
    }

    fn has_exited(&self) -> bool {
        self.exited
    }

    fn score(&self) -> i64 {
        self.score
    }
}

/// A fully known world layout.
#[derive(Clone, Debug)]
pub struct TestWorld {
    pub grid: GridSpec,
    pub pits: HashSet<Cell>,
    pub wumpus: Option<Cell>,
    pub wumpus_alive: bool,
    pub prize: Option<Cell>,
    pub has_prize: bool,
    pub body: Body,
    bump: bool,
    scream: bool,
}

/// How an episode ended.
#[derive(Clone, Debug)]
pub struct EpisodeOutcome {
    pub actions: Vec<Action>,
    pub dead: bool,
    pub exited: bool,
    pub has_prize: bool,
    pub score: i64,
    pub bumps: usize,
}

impl TestWorld {
    /// World with the agent at the origin facing east, holding one charge.
    pub fn new(size: usize, pits: &[Cell], wumpus: Option<Cell>, prize: Option<Cell>) -> Self {
        Self {
            grid: GridSpec::new(size).unwrap(),
            pits: pits.iter().copied().collect(),
            wumpus,
            wumpus_alive: wumpus.is_some(),
            prize,
            has_prize: false,
            body: Body {
                state: State::new(Cell::new(0, 0), Heading::East),
                charges: 1,
                dead: false,
                exited: false,
                score: 0,
            },
            bump: false,
            scream: false,
        }
    }

    /// Random layout: each non-origin cell is a pit with probability
    /// `pit_prior`; wumpus and prize sit on distinct non-origin cells.
    pub fn random(size: usize, pit_prior: f64, rng: &mut StdRng) -> Self {
        let grid = GridSpec::new(size).unwrap();
        let origin = Cell::new(0, 0);
        let others: Vec<Cell> = grid.cells().filter(|&c| c != origin).collect();

        let pits: Vec<Cell> = others
            .iter()
            .copied()
            .filter(|_| rng.random_bool(pit_prior))
            .collect();
        let wumpus = others[rng.random_range(0..others.len())];
        let prize = others[rng.random_range(0..others.len())];
        Self::new(size, &pits, Some(wumpus), Some(prize))
    }

    fn is_deadly(&self, cell: Cell) -> bool {
        self.pits.contains(&cell) || (self.wumpus_alive && self.wumpus == Some(cell))
    }

    /// Percept at the agent's cell; bump and scream report the last action.
    pub fn percept(&mut self) -> Percept {
        let here = self.body.state.cell;
        let neighbors = self.grid.neighbors(here);
        let percept = Percept {
            breeze: neighbors.iter().any(|c| self.pits.contains(c)),
            // A dead wumpus still smells
            stench: self.wumpus.is_some_and(|w| neighbors.contains(&w)),
            glitter: self.prize == Some(here),
            bump: self.bump,
            scream: self.scream,
            score_delta: 0,
        };
        self.bump = false;
        self.scream = false;
        percept
    }

    pub fn apply(&mut self, action: Action) {
        self.body.score -= 1;
        let state = self.body.state;
        match action {
            Action::Forward => match self.grid.neighbor_toward(state.cell, state.heading) {
                Some(next) => {
                    self.body.state = State::new(next, state.heading);
                    if self.is_deadly(next) {
                        self.body.dead = true;
                        self.body.score -= 1000;
                    }
                }
                None => self.bump = true,
            },
            Action::TurnLeft => {
                self.body.state = State::new(state.cell, state.heading.turn_left());
            }
            Action::TurnRight => {
                self.body.state = State::new(state.cell, state.heading.turn_right());
            }
            Action::Attack => {
                if self.body.charges > 0 {
                    self.body.charges -= 1;
                    self.body.score -= 10;
                    if self.wumpus_alive
                        && let Some(w) = self.wumpus
                        && self.grid.ray(state.cell, state.heading).contains(&w)
                    {
                        self.wumpus_alive = false;
                        self.scream = true;
                    }
                }
            }
            Action::Collect => {
                if self.prize == Some(state.cell) {
                    self.prize = None;
                    self.has_prize = true;
                }
            }
            Action::Exit => {
                if state.cell == Cell::new(0, 0) {
                    self.body.exited = true;
                    if self.has_prize {
                        self.body.score += 1000;
                    }
                }
            }
        }
    }

    fn finished(&self) -> bool {
        self.body.dead || self.body.exited
    }

    /// Run until the agent dies or exits, or `MAX_STEPS` is hit.
    pub fn run(&mut self, agent: &mut HuntAgent) -> Result<EpisodeOutcome> {
        let mut actions = Vec::new();
        let mut bumps = 0;
        while !self.finished() && actions.len() < MAX_STEPS {
            let percept = self.percept();
            if percept.bump {
                bumps += 1;
            }
            let action = agent.next_action(&percept, &self.body)?;
            self.apply(action);
            actions.push(action);
        }
        Ok(EpisodeOutcome {
            actions,
            dead: self.body.dead,
            exited: self.body.exited,
            has_prize: self.has_prize,
            score: self.body.score,
            bumps,
        })
    }

    /// One engine step: sense, decide, act.
    pub fn step(&mut self, agent: &mut HuntAgent) -> Result<Action> {
        let percept = self.percept();
        let action = agent.next_action(&percept, &self.body)?;
        self.apply(action);
        Ok(action)
    }
}

pub fn default_agent() -> HuntAgent {
    HuntAgent::new(AgentConfig::default()).unwrap()
}
