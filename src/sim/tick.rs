//! Simulation tick
//!
//! Integrates the ball with measured time, then runs the contact pass
//! against every edge in declaration order. `SimState::events` only ever
//! holds the events of the most recent tick.

use glam::Vec2;

use super::container::Edge;
use super::geometry::{reflect, segment_projection, signed_distance_to_line};
use super::state::{SimEvent, SimPhase, SimState};
use crate::consts::CONTACT_SLOP;
use crate::settings::{ContactTest, Resolution};

/// External input observed at a frame boundary
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Quit requested by the event source
    pub quit: bool,
}

/// Ball touching or overlapping one edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Index of the edge in the container
    pub edge: usize,
    /// Point on the edge the ball is resolved against
    pub point: Vec2,
    /// Unit collision normal, pointing into the container
    pub normal: Vec2,
    /// Ball centre's distance from `point` along `normal`
    pub separation: f32,
}

impl Contact {
    /// How far the ball has crossed the edge (negative when clear)
    #[inline]
    pub fn depth(&self, radius: f32) -> f32 {
        radius - self.separation
    }

    /// Ball centre placed exactly `radius` away from the contact point
    #[inline]
    pub fn resolved_position(&self, radius: f32) -> Vec2 {
        self.point + self.normal * radius
    }
}

/// Check one edge for contact with a ball of `radius` centred at `pos`
///
/// Degenerate edges never report contact.
pub fn probe_edge(
    index: usize,
    edge: &Edge,
    pos: Vec2,
    radius: f32,
    test: ContactTest,
) -> Option<Contact> {
    if edge.is_degenerate() {
        return None;
    }

    match test {
        ContactTest::Segment => {
            let proj = segment_projection(pos, edge.a, edge.b);
            if proj.distance > radius {
                return None;
            }

            // Near a corner the closest point is a vertex; push away from it
            // as long as the centre is still on the inner side of this edge.
            let mut normal = edge.normal;
            if proj.at_endpoint() {
                let corner = (pos - proj.point).normalize_or_zero();
                if corner.dot(edge.normal) > 0.0 {
                    normal = corner;
                }
            }

            Some(Contact {
                edge: index,
                point: proj.point,
                normal,
                separation: (pos - proj.point).dot(normal),
            })
        }
        ContactTest::Plane => {
            let separation = signed_distance_to_line(pos, edge.a, edge.normal);
            if separation >= radius {
                return None;
            }
            Some(Contact {
                edge: index,
                point: pos - edge.normal * separation,
                normal: edge.normal,
                separation,
            })
        }
    }
}

/// Advance the simulation by `dt` seconds of measured time
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.quit && state.is_running() {
        state.phase = SimPhase::Stopped;
        state.events.push(SimEvent::Stopped);
        log::info!("Simulation stopped after {} ticks", state.time_ticks);
        return;
    }

    if !state.is_running() {
        return;
    }

    debug_assert!(
        dt.is_finite() && dt >= 0.0,
        "tick dt must be finite and non-negative, got {dt}"
    );

    state.time_ticks += 1;
    state.ball.pos += state.ball.vel * dt;

    let bounced = respond_to_contacts(state);
    clear_residual_overlap(state, bounced);
}

/// Reflect velocity off approaching contacts and snap out of each one
///
/// Returns the last contact responded to, if any.
fn respond_to_contacts(state: &mut SimState) -> Option<Contact> {
    let SimState {
        container,
        ball,
        contact_test,
        resolution,
        bounces,
        events,
        ..
    } = state;

    let mut last = None;
    for (i, edge) in container.edges().iter().enumerate() {
        let Some(contact) = probe_edge(i, edge, ball.pos, ball.radius, *contact_test) else {
            continue;
        };

        // Already moving away: leave it alone
        if ball.vel.dot(contact.normal) >= 0.0 {
            continue;
        }

        ball.vel = reflect(ball.vel, contact.normal);
        ball.pos = contact.resolved_position(ball.radius);
        *bounces += 1;

        log::debug!(
            "Bounce off edge {} normal={:?} pos={:?} vel={:?}",
            i,
            contact.normal,
            ball.pos,
            ball.vel
        );
        events.push(SimEvent::Bounce {
            edge: i,
            normal: contact.normal,
            speed: ball.speed(),
        });
        last = Some(contact);

        if *resolution == Resolution::FirstHit {
            break;
        }
    }
    last
}

/// Contacts at `pos` that overlap by more than the slop
fn overlapping(state: &SimState, pos: Vec2) -> impl Iterator<Item = Contact> + '_ {
    let radius = state.ball.radius;
    state
        .container
        .edges()
        .iter()
        .enumerate()
        .filter_map(move |(i, edge)| probe_edge(i, edge, pos, radius, state.contact_test))
        .filter(move |c| c.depth(radius) > CONTACT_SLOP)
}

/// Deepest overlapping contact at `pos`, skipping edge `exclude`
fn deepest_overlap(state: &SimState, pos: Vec2, exclude: Option<usize>) -> Option<Contact> {
    let radius = state.ball.radius;
    overlapping(state, pos)
        .filter(|c| Some(c.edge) != exclude)
        .max_by(|a, b| {
            a.depth(radius)
                .partial_cmp(&b.depth(radius))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Centre position touching both contact lines at `radius`
///
/// `None` when the two lines are (nearly) parallel.
fn wedge_position(first: &Contact, second: &Contact, radius: f32) -> Option<Vec2> {
    let (n1, n2) = (first.normal, second.normal);
    let det = n1.perp_dot(n2);
    if det.abs() < 1e-6 {
        return None;
    }

    let d1 = n1.dot(first.point) + radius;
    let d2 = n2.dot(second.point) + radius;
    Some(Vec2::new(
        (d1 * n2.y - n1.y * d2) / det,
        (n1.x * d2 - d1 * n2.x) / det,
    ))
}

/// Push the ball out of any edge it still overlaps, by position only
///
/// A single overlap snaps along its normal. When that snap would land in a
/// neighbouring edge (a corner), the ball goes to the point touching both.
/// The edge bounced off this tick stays exactly `radius` away: a snap that
/// lifts the ball off its line is replaced by the point touching both lines.
fn clear_residual_overlap(state: &mut SimState, bounced: Option<Contact>) {
    let radius = state.ball.radius;

    for _ in 0..state.container.len() {
        let pos = state.ball.pos;
        let Some(first) = deepest_overlap(state, pos, None) else {
            return;
        };

        let candidate = first.resolved_position(radius);
        let mut resolved = match deepest_overlap(state, candidate, Some(first.edge)) {
            None => candidate,
            Some(second) => wedge_position(&first, &second, radius).unwrap_or(candidate),
        };

        if let Some(anchor) = bounced.filter(|b| b.edge != first.edge) {
            let lift = (resolved - anchor.point).dot(anchor.normal) - radius;
            if lift > CONTACT_SLOP {
                resolved = wedge_position(&anchor, &first, radius).unwrap_or(resolved);
            }
        }
        state.ball.pos = resolved;
    }

    let pos = state.ball.pos;
    if let Some(contact) = deepest_overlap(state, pos, None) {
        log::warn!(
            "Ball still overlaps edge {} by {:.4} after resolution",
            contact.edge,
            contact.depth(radius)
        );
    }
}

/// Edges the ball currently overlaps by more than the slop
pub fn overlaps(state: &SimState) -> Vec<Contact> {
    overlapping(state, state.ball.pos).collect()
}
