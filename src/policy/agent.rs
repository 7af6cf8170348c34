//! Hunt agent: the per-step control loop.

use std::collections::{HashMap, VecDeque};

use crate::belief::{Belief, HazardKind};
use crate::config::AgentConfig;
use crate::core::{Action, AgentView, Bearing, Cell, GridSpec, Percept, State};
use crate::error::{AnveshakError, Result};
use crate::graph::StateGraph;
use crate::planning::{path_home, shortest_path, to_actions};

use super::{DecisionPhase, RISK_TIE_EPSILON};

/// Belief-driven agent that explores, hunts, collects and retreats.
pub struct HuntAgent {
    config: AgentConfig,
    belief: Belief,
    graph: StateGraph,
    /// Planned actions not yet emitted
    queue: VecDeque<Action>,
    /// State the last attack was fired from, until its outcome is known
    pending_attack: Option<State>,
    /// Prize already picked up
    collected: bool,
    phase: DecisionPhase,
    steps: u64,
}

impl HuntAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let grid = GridSpec::new(config.grid_size)?;
        let belief = Belief::new(
            grid,
            config.pit_prior,
            config.effective_wumpus_prior(),
            config.max_exact_variables,
            config.origin,
        )?;
        tracing::info!(
            "HuntAgent ready: {}x{} grid, origin {}, risk threshold {:.2}",
            grid.size(),
            grid.size(),
            config.origin,
            config.risk_threshold
        );
        Ok(Self {
            config,
            belief,
            graph: StateGraph::new(grid),
            queue: VecDeque::new(),
            pending_attack: None,
            collected: false,
            phase: DecisionPhase::Idle,
            steps: 0,
        })
    }

    /// Choose the next action for the agent described by `view`.
    ///
    /// Percepts are folded into the belief and the graph on every call, even
    /// while a queued plan is being replayed.
    pub fn next_action(&mut self, percept: &Percept, view: &impl AgentView) -> Result<Action> {
        if view.is_dead() || view.has_exited() {
            return Err(AnveshakError::EpisodeOver);
        }
        self.steps += 1;
        let here = view.state();
        tracing::trace!("Step {} at {}, score {}", self.steps, here, view.score());

        self.phase = DecisionPhase::Sensing;
        self.sense(percept, here)?;

        if let Some(action) = self.queue.pop_front() {
            self.phase = if action == Action::Exit {
                DecisionPhase::Exiting
            } else {
                DecisionPhase::ExecutingPlan
            };
            return Ok(self.emit(action, here));
        }

        if percept.glitter && !self.collected {
            return self.collect(here);
        }

        if percept.stench
            && view.attack_charges() >= 1
            && !self.belief.tracker().is_eliminated(HazardKind::Wumpus)
            && let Some(action) = self.hunt(here)?
        {
            return Ok(action);
        }

        self.explore(here)
    }

    pub fn phase(&self) -> DecisionPhase {
        self.phase
    }

    /// Actions still waiting in the current plan.
    pub fn queued_actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.queue.iter().copied()
    }

    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Number of `next_action` calls that got past the liveness check.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Fold the percept at `here` into the tracker and the graph.
    fn sense(&mut self, percept: &Percept, here: State) -> Result<()> {
        if let Some(origin) = self.pending_attack.take() {
            let tracker = self.belief.tracker_mut();
            if percept.scream {
                tracing::info!("Scream after attack from {}: wumpus is dead", origin);
                tracker.eliminate_all(HazardKind::Wumpus);
            } else {
                tracing::debug!("Attack from {} missed", origin);
                tracker.eliminate_along_ray(origin.cell, origin.heading)?;
            }
        }
        if percept.bump {
            tracing::debug!("Bump at {}", here);
        }

        let tracker = self.belief.tracker_mut();
        tracker.mark_safe(here.cell)?;
        tracker.record_cue(here.cell, HazardKind::Pit, percept.breeze)?;
        tracker.record_cue(here.cell, HazardKind::Wumpus, percept.stench)?;

        self.graph.visit(here.cell, here.heading);
        Ok(())
    }

    fn emit(&mut self, action: Action, here: State) -> Action {
        if action == Action::Attack {
            self.pending_attack = Some(here);
        }
        if action.is_motion() {
            tracing::trace!("Step {}: {} at {}", self.steps, action, here);
        } else {
            tracing::debug!("Step {}: {} at {}", self.steps, action, here);
        }
        action
    }

    /// Pick up the prize now and queue the walk home.
    fn collect(&mut self, here: State) -> Result<Action> {
        self.collected = true;
        let path = path_home(&self.graph, here, self.config.origin)?;
        self.enqueue(&path, &[Action::Exit], here)?;
        tracing::info!(
            "Prize collected at {}; {} actions to exit",
            here.cell,
            self.queue.len()
        );
        self.phase = DecisionPhase::Collecting;
        Ok(self.emit(Action::Collect, here))
    }

    /// Face the most probable wumpus cell and attack it.
    ///
    /// Returns `None` when that cell is not on the agent's row or column.
    fn hunt(&mut self, here: State) -> Result<Option<Action>> {
        let (target, p) = self.belief.most_probable(HazardKind::Wumpus)?;
        let Bearing::Toward(heading) = Bearing::between(here.cell, target) else {
            tracing::debug!("Wumpus most likely at {} (p={:.3}), not in line", target, p);
            return Ok(None);
        };

        let mut plan = match here.heading.turn_delta(heading).rem_euclid(4) {
            1 => vec![Action::TurnRight],
            2 => vec![Action::TurnRight, Action::TurnRight],
            3 => vec![Action::TurnLeft],
            _ => Vec::new(),
        };
        plan.push(Action::Attack);
        tracing::info!(
            "Hunting wumpus at {} (p={:.3}) facing {}: {} actions",
            target,
            p,
            heading,
            plan.len()
        );

        self.phase = DecisionPhase::Hunting;
        self.queue.extend(plan);
        Ok(self.queue.pop_front().map(|action| self.emit(action, here)))
    }

    /// Move towards the least risky frontier, or retreat if none is safe enough.
    fn explore(&mut self, here: State) -> Result<Action> {
        let frontier = self.graph.frontier_nodes();
        if frontier.is_empty() {
            tracing::info!("No frontier left");
            return self.retreat(here);
        }

        let mut risk_by_cell: HashMap<Cell, f64> = HashMap::new();
        let mut ranked = Vec::with_capacity(frontier.len());
        for node in frontier {
            let risk = match risk_by_cell.get(&node.cell) {
                Some(&risk) => risk,
                None => {
                    let risk = self.belief.combined_risk(node.cell)?;
                    risk_by_cell.insert(node.cell, risk);
                    risk
                }
            };
            ranked.push((node, risk));
        }

        let min_risk = ranked
            .iter()
            .map(|&(_, risk)| risk)
            .fold(f64::INFINITY, f64::min);
        tracing::debug!(
            "{} frontier nodes over {} cells, min risk {:.3}",
            ranked.len(),
            risk_by_cell.len(),
            min_risk
        );

        if min_risk > self.config.risk_threshold {
            tracing::warn!(
                "Every frontier is too risky ({:.3} > {:.3}), retreating",
                min_risk,
                self.config.risk_threshold
            );
            return self.retreat(here);
        }

        let mut best: Option<Vec<State>> = None;
        for (node, risk) in ranked {
            if risk - min_risk > RISK_TIE_EPSILON {
                continue;
            }
            match shortest_path(&self.graph, here, node) {
                Ok(path) => {
                    if best.as_ref().is_none_or(|b| path.len() < b.len()) {
                        best = Some(path);
                    }
                }
                Err(AnveshakError::NoPath { .. }) => {
                    tracing::debug!("Frontier {} unreachable from {}", node, here);
                }
                Err(e) => return Err(e),
            }
        }

        let Some(path) = best else {
            tracing::warn!("No reachable frontier among the safest candidates");
            return self.retreat(here);
        };
        if let Some(target) = path.last() {
            tracing::debug!(
                "Exploring towards {} (risk {:.3}, {} states)",
                target,
                min_risk,
                path.len()
            );
        }
        self.enqueue(&path, &[], here)?;
        self.phase = DecisionPhase::Exploring;
        self.pop_planned(here, &path)
    }

    /// Head home and exit.
    fn retreat(&mut self, here: State) -> Result<Action> {
        if here.cell == self.config.origin {
            tracing::info!("Exiting at {} after {} steps", here.cell, self.steps);
            self.phase = DecisionPhase::Exiting;
            return Ok(self.emit(Action::Exit, here));
        }
        let path = path_home(&self.graph, here, self.config.origin)?;
        self.enqueue(&path, &[Action::Exit], here)?;
        tracing::info!(
            "Retreating from {}: {} actions to exit",
            here.cell,
            self.queue.len()
        );
        self.phase = DecisionPhase::Retreating;
        self.pop_planned(here, &path)
    }

    /// Append the actions that replay `path` from `here`, then `trailing`.
    fn enqueue(&mut self, path: &[State], trailing: &[Action], here: State) -> Result<()> {
        match path.first() {
            Some(&start) if start == here => {}
            Some(&start) => {
                return Err(AnveshakError::PathDesync {
                    expected: here,
                    found: start,
                });
            }
            None => return Err(AnveshakError::InvalidPath { from: here, to: here }),
        }
        let actions = to_actions(path, trailing)?;
        self.queue.extend(actions);
        Ok(())
    }

    fn pop_planned(&mut self, here: State, path: &[State]) -> Result<Action> {
        match self.queue.pop_front() {
            Some(action) => Ok(self.emit(action, here)),
            None => Err(AnveshakError::InvalidPath {
                from: here,
                to: path.last().copied().unwrap_or(here),
            }),
        }
    }
}
