use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Curve {
    LinearClosed,
    CardinalClosed { tension: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    CubicTo {
        c1: (f32, f32),
        c2: (f32, f32),
        to: (f32, f32),
    },
    Close,
}

/// Builds the closed outline through `points` in order.
///
/// The cardinal variant emits one cubic segment per edge and starts at the
/// second vertex, so the seam falls between the first two spokes.
pub fn closed_path(points: &[(f32, f32)], curve: Curve) -> Vec<PathCommand> {
    match points {
        [] => Vec::new(),
        [only] => vec![PathCommand::MoveTo(only.0, only.1), PathCommand::Close],
        _ => match curve {
            Curve::LinearClosed => linear_closed(points),
            Curve::CardinalClosed { tension } => {
                if points.len() == 2 {
                    vec![
                        PathCommand::MoveTo(points[1].0, points[1].1),
                        PathCommand::LineTo(points[0].0, points[0].1),
                        PathCommand::Close,
                    ]
                } else {
                    cardinal_closed(points, tension)
                }
            }
        },
    }
}

fn linear_closed(points: &[(f32, f32)]) -> Vec<PathCommand> {
    let mut commands = Vec::with_capacity(points.len() + 1);
    commands.push(PathCommand::MoveTo(points[0].0, points[0].1));
    for point in &points[1..] {
        commands.push(PathCommand::LineTo(point.0, point.1));
    }
    commands.push(PathCommand::Close);
    commands
}

fn cardinal_closed(points: &[(f32, f32)], tension: f32) -> Vec<PathCommand> {
    let n = points.len();
    let k = (1.0 - tension) / 6.0;
    let at = |i: usize| points[i % n];
    let mut commands = Vec::with_capacity(n + 1);
    commands.push(PathCommand::MoveTo(at(1).0, at(1).1));
    for step in 0..n {
        let i = step + 1;
        let prev = at(i + n - 1);
        let from = at(i);
        let to = at(i + 1);
        let next = at(i + 2);
        commands.push(PathCommand::CubicTo {
            c1: (from.0 + k * (to.0 - prev.0), from.1 + k * (to.1 - prev.1)),
            c2: (to.0 + k * (from.0 - next.0), to.1 + k * (from.1 - next.1)),
            to,
        });
    }
    commands
}

pub fn path_to_svg(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for command in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match command {
            PathCommand::MoveTo(x, y) => d.push_str(&format!("M {x:.2} {y:.2}")),
            PathCommand::LineTo(x, y) => d.push_str(&format!("L {x:.2} {y:.2}")),
            PathCommand::CubicTo { c1, c2, to } => d.push_str(&format!(
                "C {:.2} {:.2} {:.2} {:.2} {:.2} {:.2}",
                c1.0, c1.1, c2.0, c2.1, to.0, to.1
            )),
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<(f32, f32)> {
        vec![(0.0, -10.0), (10.0, 0.0), (0.0, 10.0), (-10.0, 0.0)]
    }

    #[test]
    fn linear_path_visits_every_vertex_then_closes() {
        let commands = closed_path(&square(), Curve::LinearClosed);
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], PathCommand::MoveTo(0.0, -10.0));
        let lines = commands
            .iter()
            .filter(|c| matches!(c, PathCommand::LineTo(..)))
            .count();
        assert_eq!(lines, 3);
        assert_eq!(commands[4], PathCommand::Close);
        assert_eq!(
            path_to_svg(&commands),
            "M 0.00 -10.00 L 10.00 0.00 L 0.00 10.00 L -10.00 0.00 Z"
        );
    }

    #[test]
    fn cardinal_path_passes_through_every_vertex_and_returns_to_start() {
        let pts = square();
        let commands = closed_path(&pts, Curve::CardinalClosed { tension: 0.0 });
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[0], PathCommand::MoveTo(10.0, 0.0));
        let ends: Vec<(f32, f32)> = commands
            .iter()
            .filter_map(|c| match c {
                PathCommand::CubicTo { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(ends, vec![pts[2], pts[3], pts[0], pts[1]]);
    }

    #[test]
    fn cardinal_control_points_follow_neighbour_tangents() {
        let pts = square();
        let commands = closed_path(&pts, Curve::CardinalClosed { tension: 0.0 });
        let PathCommand::CubicTo { c1, c2, .. } = commands[1] else {
            panic!("expected cubic segment");
        };
        // From (10,0) to (0,10): previous vertex (0,-10), next (-10,0).
        let k = 1.0 / 6.0;
        assert!((c1.0 - (10.0 + k * (0.0 - 0.0))).abs() < 1e-4);
        assert!((c1.1 - (0.0 + k * (10.0 + 10.0))).abs() < 1e-4);
        assert!((c2.0 - (0.0 + k * (10.0 + 10.0))).abs() < 1e-4);
        assert!((c2.1 - (10.0 + k * (0.0 - 0.0))).abs() < 1e-4);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(closed_path(&[], Curve::LinearClosed).is_empty());
        assert_eq!(
            closed_path(&[(1.0, 2.0)], Curve::CardinalClosed { tension: 0.0 }),
            vec![PathCommand::MoveTo(1.0, 2.0), PathCommand::Close]
        );
        let two = closed_path(&[(0.0, 0.0), (1.0, 1.0)], Curve::CardinalClosed { tension: 0.0 });
        assert_eq!(two[0], PathCommand::MoveTo(1.0, 1.0));
        assert_eq!(two.len(), 3);
    }
}
