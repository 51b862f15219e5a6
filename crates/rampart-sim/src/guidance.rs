//! Aim solving for projectiles.
//!
//! Projectiles fly straight at constant speed, so leading a target reduces to
//! finding the smallest positive `t` with `|d + v t| = s t`, where `d` is the
//! shooter-to-target offset, `v` the target velocity and `s` the projectile
//! speed. When no such `t` exists the solver falls back to the linear lead
//! `t = distance / speed` and extrapolates the target along its velocity.

use glam::DVec2;

use rampart_core::types::{Position, Velocity};

/// Below this the quadratic's leading coefficient (relative to s^2) is
/// treated as zero: target speed equals projectile speed.
const LEADING_COEFF_EPSILON: f64 = 1e-9;

/// Shooter and target closer than this share a point.
const MIN_SOLVE_DISTANCE: f64 = 1e-6;

/// How the intercept time was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptMethod {
    /// Smallest positive root of the intercept quadratic.
    Quadratic,
    /// Target speed equals projectile speed; solved the remaining linear equation.
    EqualSpeed,
    /// No positive root: `t = distance / speed` with linear extrapolation.
    LinearFallback,
    /// Unusable inputs; aiming straight ahead.
    Degenerate,
}

#[derive(Debug, Clone, Copy)]
pub struct AimSolution {
    /// Point the projectile is launched toward.
    pub aim_point: Position,
    /// Launch angle in radians (0 = +x).
    pub angle: f64,
    /// Predicted flight time to `aim_point` in seconds.
    pub time_secs: f64,
    pub method: InterceptMethod,
    /// The prediction was pulled back to the barrier line.
    pub clamped: bool,
}

impl AimSolution {
    /// Launch velocity at `speed` along the solved angle.
    pub fn velocity(&self, speed: f64) -> Velocity {
        Velocity::from_angle(self.angle, speed)
    }
}

/// Solve the lead for a projectile fired from `shooter` at `projectile_speed`.
///
/// If `barrier_x` is set, the predicted point is never placed beyond the
/// barrier line (further toward -x than `min(barrier_x, target.x)`); a
/// prediction that would cross it is pulled back along the target's path.
pub fn solve_intercept(
    shooter: &Position,
    target: &Position,
    target_vel: &Velocity,
    projectile_speed: f64,
    barrier_x: Option<f64>,
) -> AimSolution {
    let origin = shooter.as_dvec2();
    let target_pos = target.as_dvec2();
    let vel = target_vel.as_dvec2();

    if !(projectile_speed.is_finite() && projectile_speed > 0.0)
        || !origin.is_finite()
        || !target_pos.is_finite()
        || !vel.is_finite()
    {
        return straight_ahead(shooter);
    }

    let offset = target_pos - origin;
    let distance = offset.length();
    if distance < MIN_SOLVE_DISTANCE {
        return straight_ahead(shooter);
    }

    let (mut time, method) = intercept_time(offset, vel, projectile_speed);
    let mut aim = target_pos + vel * time;

    let mut clamped = false;
    if let Some(barrier) = barrier_x.filter(|b| b.is_finite()) {
        let limit = barrier.min(target_pos.x);
        if aim.x < limit && vel.x < 0.0 {
            time = (limit - target_pos.x) / vel.x;
            aim = target_pos + vel * time;
            aim.x = limit;
            clamped = true;
        }
    }

    let dir = aim - origin;
    let angle = dir.y.atan2(dir.x);
    if !angle.is_finite() {
        return straight_ahead(shooter);
    }

    AimSolution {
        aim_point: Position::from_dvec2(aim),
        angle,
        time_secs: time,
        method,
        clamped,
    }
}

/// Convenience wrapper returning only the launch angle.
pub fn compute_aim_angle(
    shooter: &Position,
    target: &Position,
    target_vel: &Velocity,
    projectile_speed: f64,
    barrier_x: Option<f64>,
) -> f64 {
    solve_intercept(shooter, target, target_vel, projectile_speed, barrier_x).angle
}

/// Time until a projectile at `speed` can meet a target at `offset` moving
/// with `vel`.
fn intercept_time(offset: DVec2, vel: DVec2, speed: f64) -> (f64, InterceptMethod) {
    let speed_sq = speed * speed;
    let a = vel.length_squared() - speed_sq;
    let b = 2.0 * offset.dot(vel);
    let c = offset.length_squared();
    let linear = (c.sqrt() / speed, InterceptMethod::LinearFallback);

    if a.abs() < LEADING_COEFF_EPSILON * speed_sq {
        // b t + c = 0
        if b.abs() > f64::EPSILON {
            let t = -c / b;
            if t > 0.0 && t.is_finite() {
                return (t, InterceptMethod::EqualSpeed);
            }
        }
        return linear;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return linear;
    }
    let root = discriminant.sqrt();
    let t1 = (-b - root) / (2.0 * a);
    let t2 = (-b + root) / (2.0 * a);

    [t1, t2]
        .into_iter()
        .filter(|t| *t > 0.0 && t.is_finite())
        .min_by(f64::total_cmp)
        .map(|t| (t, InterceptMethod::Quadratic))
        .unwrap_or(linear)
}

fn straight_ahead(shooter: &Position) -> AimSolution {
    AimSolution {
        aim_point: *shooter,
        angle: 0.0,
        time_secs: 0.0,
        method: InterceptMethod::Degenerate,
        clamped: false,
    }
}
