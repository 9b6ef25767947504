use std::f64::consts::TAU;

use crate::foundation::core::{Point, Rgba8};

/// Multiplier applied to every [`Body::orbital_radius`] before it is drawn.
pub const RADIUS_SCALE: f64 = 0.35;

/// Global tuning factor: how many "days" of orbit pass per second of animation.
pub const SPEED: f64 = 25.0;

/// One orbiting body.
///
/// Radii are decorative and compressed so the outer planets still fit next to the inner ones.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Body {
    pub name: &'static str,
    pub orbital_radius: f64,
    pub period_days: f64,
    pub display_size: f64,
    pub color: Rgba8,
}

impl Body {
    pub fn scaled_radius(&self) -> f64 {
        self.orbital_radius * RADIUS_SCALE
    }

    /// Radians per second of animation time.
    pub fn angular_speed(&self) -> f64 {
        SPEED * TAU / self.period_days
    }

    pub fn position_at(&self, t: f64) -> Point {
        let r = self.scaled_radius();
        let theta = self.angular_speed() * t;
        Point::new(r * theta.cos(), r * theta.sin())
    }
}

/// The central body drawn at the origin.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CentralBody {
    pub name: &'static str,
    pub display_size: f64,
    pub color: Rgba8,
}

pub const SUN: CentralBody = CentralBody {
    name: "Sun",
    display_size: 18.0,
    color: Rgba8::rgb(255, 204, 0),
};

pub const SOLAR_SYSTEM: [Body; 8] = [
    Body {
        name: "Mercury",
        orbital_radius: 0.40,
        period_days: 88.0,
        display_size: 4.0,
        color: Rgba8::rgb(169, 169, 169),
    },
    Body {
        name: "Venus",
        orbital_radius: 0.70,
        period_days: 225.0,
        display_size: 6.0,
        color: Rgba8::rgb(230, 190, 120),
    },
    Body {
        name: "Earth",
        orbital_radius: 1.00,
        period_days: 365.0,
        display_size: 6.5,
        color: Rgba8::rgb(70, 130, 230),
    },
    Body {
        name: "Mars",
        orbital_radius: 1.50,
        period_days: 687.0,
        display_size: 5.0,
        color: Rgba8::rgb(212, 5, 17),
    },
    Body {
        name: "Jupiter",
        orbital_radius: 2.60,
        period_days: 4333.0,
        display_size: 11.0,
        color: Rgba8::rgb(210, 160, 110),
    },
    Body {
        name: "Saturn",
        orbital_radius: 3.60,
        period_days: 10759.0,
        display_size: 10.0,
        color: Rgba8::rgb(235, 210, 140),
    },
    Body {
        name: "Uranus",
        orbital_radius: 4.60,
        period_days: 30687.0,
        display_size: 8.0,
        color: Rgba8::rgb(150, 220, 230),
    },
    Body {
        name: "Neptune",
        orbital_radius: 5.60,
        period_days: 60190.0,
        display_size: 8.0,
        color: Rgba8::rgb(60, 90, 220),
    },
];

/// Largest scaled radius in `bodies`, or 0 when empty.
pub fn max_scaled_radius(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(Body::scaled_radius)
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
#[path = "../../tests/unit/system/bodies.rs"]
mod tests;
