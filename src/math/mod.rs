pub const PI: f32 = std::f32::consts::PI;

pub fn to_degrees(radians: f32) -> f32 {
    radians * 180.0 / PI
}

/// Rotates `point` about `pivot` by `degrees` (clockwise in screen space, y down).
pub fn rotate_point(point: [f32; 2], pivot: [f32; 2], degrees: f32) -> [f32; 2] {
    let (sin, cos) = (degrees * PI / 180.0).sin_cos();
    let dx = point[0] - pivot[0];
    let dy = point[1] - pivot[1];
    [
        pivot[0] + dx * cos - dy * sin,
        pivot[1] + dx * sin + dy * cos,
    ]
}

pub fn distance(a: [f32; 2], b: [f32; 2]) -> f32 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

pub fn point_to_line_distance(point: [f32; 2], line_start: [f32; 2], line_end: [f32; 2]) -> f32 {
    let line_length_squared = (line_end[0] - line_start[0]).powi(2) + (line_end[1] - line_start[1]).powi(2);

    if line_length_squared == 0.0 {
        return distance(point, line_start);
    }

    let t = ((point[0] - line_start[0]) * (line_end[0] - line_start[0])
        + (point[1] - line_start[1]) * (line_end[1] - line_start[1]))
        / line_length_squared;
    let t = t.clamp(0.0, 1.0);

    let projection = [
        line_start[0] + t * (line_end[0] - line_start[0]),
        line_start[1] + t * (line_end[1] - line_start[1]),
    ];

    distance(point, projection)
}
