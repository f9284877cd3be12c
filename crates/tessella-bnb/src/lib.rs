// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Tessella-BnB: branch-and-bound for weighted exact cover
//!
//! An exact, best-first branch-and-bound engine for minimum-cost exact
//! cover (set partitioning). The engine separates tree structure, node
//! ordering, bounding and monitoring so each can be understood and tested
//! on its own.
//!
//! Core flow
//! - Provide a validated `tessella_model::instance::Instance<C>`.
//! - `bnb::BnbSolver` reduces duplicate subsets, seeds the root node and
//!   explores nodes in ascending lower-bound order.
//! - Per node, `subinstance` filters the subset family by the node's
//!   ancestor constraints, `dual` bounds the remainder via subgradient
//!   ascent on the Lagrangian dual of the covering relaxation, and the
//!   driver prunes, closes or branches.
//!
//! Design highlights
//! - Two-way branching on element pairs: the both-child forces two
//!   elements into the same subset, the diff-child forces them apart.
//! - Bottom-up tree: children own `Rc` links to their parents; nothing
//!   else keeps nodes alive.
//! - Monitors observe the search and may stop it cooperatively; a stopped
//!   search degrades to a feasible (non-optimal) answer, never a wrong one.
//!
//! Module map
//! - `tree`: immutable constraint nodes.
//! - `queue`: min-heap of nodes by lower bound.
//! - `reduce`: duplicate-subset reduction with index mapping.
//! - `subinstance`: per-node subset filtering and branching-pair selection.
//! - `dual`: the Lagrangian dual bounding engine.
//! - `bnb`: the solver driver and session orchestration.
//! - `monitor`: search monitors (no-op, interrupt, time limit, composite, log).
//! - `result`: outcomes with termination reasons.
//! - `stats`: lightweight counters and timing.
//! - `error`: the search error type.

pub mod bnb;
pub mod dual;
pub mod error;
pub mod monitor;
pub mod queue;
pub mod reduce;
pub mod result;
pub mod stats;
pub mod subinstance;
pub mod tree;
