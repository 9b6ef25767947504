use crate::{
    foundation::core::{FrameIndex, Point},
    system::bodies::{Body, CentralBody},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BodyPlacement {
    pub name: &'static str,
    /// Index into the body table the frame was evaluated from.
    pub body: usize,
    pub orbit_radius: f64,
    pub position: Point,
}

/// Positions of every body at one sampled time, in world units around the origin.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OrbitFrame {
    pub frame: FrameIndex,
    pub time_s: f64,
    pub central: CentralBody,
    pub placements: Vec<BodyPlacement>,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(level = "trace", skip(bodies, central))]
    pub fn eval_frame(
        bodies: &[Body],
        central: CentralBody,
        frame: FrameIndex,
        time_s: f64,
    ) -> OrbitFrame {
        let placements = bodies
            .iter()
            .enumerate()
            .map(|(idx, body)| BodyPlacement {
                name: body.name,
                body: idx,
                orbit_radius: body.scaled_radius(),
                position: body.position_at(time_s),
            })
            .collect();

        OrbitFrame {
            frame,
            time_s,
            central,
            placements,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
