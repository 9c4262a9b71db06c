//! Position constraints: pivot joints, window walls and circle contacts.

use slotmap::SlotMap;

use crate::body::Body;
use crate::float::Float;
use crate::vec::Vec2;
use crate::world::BodyHandle;

/// Penetration a sleeping body tolerates before a contact wakes it.
const WAKE_OVERLAP: f32 = 0.25;

/// Pins a point on `body` (in body-local offset) to the position of `anchor`.
#[derive(Clone, Debug)]
pub struct PivotJoint<F: Float> {
    pub body: BodyHandle,
    pub anchor: BodyHandle,
    pub local_pivot: Vec2<F>,
    pub stiffness: F,
}

impl<F: Float> PivotJoint<F> {
    pub fn new(body: BodyHandle, anchor: BodyHandle, local_pivot: Vec2<F>, stiffness: F) -> Self {
        PivotJoint { body, anchor, local_pivot, stiffness }
    }

    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.body == handle || self.anchor == handle
    }

    /// Returns false when either end has gone away.
    pub fn solve(&self, bodies: &mut SlotMap<BodyHandle, Body<F>>) -> bool {
        let (target, anchor_inv) = match bodies.get(self.anchor) {
            Some(a) => (a.pos, a.inv_mass),
            None => return false,
        };
        let Some(body) = bodies.get(self.body) else {
            return false;
        };
        let w_total = body.inv_mass + anchor_inv;
        if w_total.is_near_zero(F::from_f32(1e-10)) {
            return true;
        }

        let error = target - (body.pos + self.local_pivot);
        let correction = error.scale(self.stiffness);
        let body_share = body.inv_mass / w_total;
        let anchor_share = anchor_inv / w_total;

        if let Some(b) = bodies.get_mut(self.body) {
            b.pos = b.pos + correction.scale(body_share);
        }
        if anchor_share > F::zero() {
            if let Some(a) = bodies.get_mut(self.anchor) {
                a.pos = a.pos - correction.scale(anchor_share);
            }
        }
        true
    }
}

/// Axis-aligned box that keeps circle bodies inside the window.
#[derive(Clone, Debug, PartialEq)]
pub struct Walls<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
    pub restitution: F,
}

impl<F: Float> Walls<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>, restitution: F) -> Self {
        Walls { min, max, restitution }
    }

    pub fn solve(&self, body: &mut Body<F>) {
        if !body.is_dynamic() || body.is_sleeping() {
            return;
        }
        let r = body.radius();
        let bounce = self.restitution * body.elasticity;
        let grip = F::one() - body.friction * F::from_f32(0.1);

        let (x, prev_x, hit_x) = clamp_axis(body.pos.x, body.prev_pos.x, self.min.x + r, self.max.x - r, bounce);
        let (y, prev_y, hit_y) = clamp_axis(body.pos.y, body.prev_pos.y, self.min.y + r, self.max.y - r, bounce);
        body.pos = Vec2::new(x, y);
        body.prev_pos = Vec2::new(prev_x, prev_y);

        // Friction acts on the tangential component along a touched wall.
        if hit_y {
            body.prev_pos.x = body.pos.x - (body.pos.x - body.prev_pos.x) * grip;
        }
        if hit_x {
            body.prev_pos.y = body.pos.y - (body.pos.y - body.prev_pos.y) * grip;
        }
    }
}

fn clamp_axis<F: Float>(pos: F, prev: F, lo: F, hi: F, bounce: F) -> (F, F, bool) {
    if lo > hi {
        let mid = (lo + hi) * F::half();
        return (mid, mid, true);
    }
    let clamped = if pos < lo {
        lo
    } else if pos > hi {
        hi
    } else {
        return (pos, prev, false);
    };
    let vel = clamped - prev;
    (clamped, clamped + vel * bounce, true)
}

/// Separate overlapping circles among `keys`. Returns the number of contacts resolved.
pub fn solve_contacts<F: Float>(bodies: &mut SlotMap<BodyHandle, Body<F>>, keys: &[BodyHandle]) -> usize {
    let mut resolved = 0;
    for (i, &ka) in keys.iter().enumerate() {
        for &kb in &keys[i + 1..] {
            let (Some(a), Some(b)) = (bodies.get(ka), bodies.get(kb)) else {
                continue;
            };
            let Some(contact) = Contact::between(a, b) else {
                continue;
            };
            resolved += 1;
            if let Some(a) = bodies.get_mut(ka) {
                contact.apply_a(a);
            }
            if let Some(b) = bodies.get_mut(kb) {
                contact.apply_b(b);
            }
        }
    }
    resolved
}

struct Contact<F: Float> {
    normal: Vec2<F>,
    push_a: F,
    push_b: F,
    wake_a: bool,
    wake_b: bool,
}

impl<F: Float> Contact<F> {
    fn between(a: &Body<F>, b: &Body<F>) -> Option<Self> {
        if a.shape.is_none() || b.shape.is_none() {
            return None;
        }
        if a.is_sleeping() && b.is_sleeping() {
            return None;
        }
        let delta = b.pos - a.pos;
        let dist = delta.length();
        let overlap = a.radius() + b.radius() - dist;
        if overlap <= F::zero() {
            return None;
        }
        let normal = if dist.is_near_zero(F::from_f32(1e-6)) {
            Vec2::new(F::one(), F::zero())
        } else {
            delta.scale(F::one() / dist)
        };

        let hard = overlap > F::from_f32(WAKE_OVERLAP);
        let wake_a = a.is_sleeping() && hard;
        let wake_b = b.is_sleeping() && hard;
        let inv_a = if a.is_sleeping() && !wake_a { F::zero() } else { a.inv_mass };
        let inv_b = if b.is_sleeping() && !wake_b { F::zero() } else { b.inv_mass };
        let w_total = inv_a + inv_b;
        if w_total.is_near_zero(F::from_f32(1e-10)) {
            return None;
        }
        Some(Contact {
            normal,
            push_a: overlap * inv_a / w_total,
            push_b: overlap * inv_b / w_total,
            wake_a,
            wake_b,
        })
    }

    fn apply_a(&self, a: &mut Body<F>) {
        if self.wake_a {
            a.wake();
        }
        a.pos = a.pos - self.normal.scale(self.push_a);
    }

    fn apply_b(&self, b: &mut Body<F>) {
        if self.wake_b {
            b.wake();
        }
        b.pos = b.pos + self.normal.scale(self.push_b);
    }
}
