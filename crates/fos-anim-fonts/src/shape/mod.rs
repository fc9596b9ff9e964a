//! Animatable shape paths
//!
//! Glyph geometry reuses the shape-layer path encoding, where every path is an
//! animatable property. [`PathAttacher`] turns such a property into its current
//! outline and registers an animator in the caller's [`AnimatorScope`] when the
//! property is keyframed.

use serde_json::Value;
use tiny_skia::PathBuilder;

use crate::glyph::Outline;

/// Converts an animatable path property into an outline
pub trait PathAttacher {
    /// Attach `property`, registering any animators in `scope`.
    ///
    /// Returns `None` if the property is missing or malformed.
    fn attach_path(&self, property: Option<&Value>, scope: &mut AnimatorScope) -> Option<Outline>;
}

/// Collects the animators registered while attaching properties
#[derive(Debug, Default)]
pub struct AnimatorScope {
    animators: Vec<PathAnimator>,
}

impl AnimatorScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, animator: PathAnimator) {
        self.animators.push(animator);
    }

    /// Close the scope, handing back everything registered in it
    pub fn release(self) -> Vec<PathAnimator> {
        self.animators
    }

    pub fn len(&self) -> usize {
        self.animators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animators.is_empty()
    }
}

/// Bezier shape: vertices with relative in/out tangents
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeData {
    pub vertices: Vec<(f32, f32)>,
    pub in_tangents: Vec<(f32, f32)>,
    pub out_tangents: Vec<(f32, f32)>,
    pub closed: bool,
}

impl ShapeData {
    /// Parse `{"v": [[x, y]..], "i": [..], "o": [..], "c": bool}`
    pub fn from_json(value: &Value) -> Option<Self> {
        // Keyframe values wrap the shape in a one-element array.
        let value = match value {
            Value::Array(items) => items.first()?,
            other => other,
        };
        let obj = value.as_object()?;

        let vertices = parse_points(obj.get("v")?)?;
        let in_tangents = match obj.get("i") {
            Some(points) => parse_points(points)?,
            None => Vec::new(),
        };
        let out_tangents = match obj.get("o") {
            Some(points) => parse_points(points)?,
            None => Vec::new(),
        };
        let closed = obj.get("c").and_then(Value::as_bool).unwrap_or(false);

        Some(Self { vertices, in_tangents, out_tangents, closed })
    }

    /// Build the outline. Missing tangents are treated as zero.
    ///
    /// Returns `None` when the vertices describe geometry that cannot be
    /// represented, e.g. coordinates outside the `f32` range.
    pub fn to_outline(&self) -> Option<Outline> {
        let Some(&first) = self.vertices.first() else {
            return Some(Outline::empty());
        };
        // A lone open vertex is a bare move with no geometry.
        if self.vertices.len() == 1 && !self.closed {
            return Some(Outline::empty());
        }

        let mut builder = PathBuilder::new();
        builder.move_to(first.0, first.1);

        let segment = |from: usize, to: usize, builder: &mut PathBuilder| {
            let (x0, y0) = self.vertices[from];
            let (x1, y1) = self.vertices[to];
            let (ox, oy) = tangent_at(&self.out_tangents, from);
            let (ix, iy) = tangent_at(&self.in_tangents, to);
            builder.cubic_to(x0 + ox, y0 + oy, x1 + ix, y1 + iy, x1, y1);
        };

        for to in 1..self.vertices.len() {
            segment(to - 1, to, &mut builder);
        }
        if self.closed {
            segment(self.vertices.len() - 1, 0, &mut builder);
            builder.close();
        }

        builder.finish().map(Outline::from_path)
    }
}

fn tangent_at(points: &[(f32, f32)], idx: usize) -> (f32, f32) {
    points.get(idx).copied().unwrap_or((0.0, 0.0))
}

fn parse_points(value: &Value) -> Option<Vec<(f32, f32)>> {
    value
        .as_array()?
        .iter()
        .map(|point| {
            let coords = point.as_array()?;
            let x = coords.first()?.as_f64()? as f32;
            let y = coords.get(1)?.as_f64()? as f32;
            Some((x, y))
        })
        .collect()
}

/// Keyframed path with hold interpolation
#[derive(Debug, Clone)]
pub struct PathAnimator {
    keyframes: Vec<(f32, ShapeData)>,
}

impl PathAnimator {
    /// Build from keyframes; `None` if there are none
    pub fn new(mut keyframes: Vec<(f32, ShapeData)>) -> Option<Self> {
        if keyframes.is_empty() {
            return None;
        }
        keyframes.sort_by(|a, b| a.0.total_cmp(&b.0));
        Some(Self { keyframes })
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    /// Shape in effect at time `t`
    pub fn shape_at(&self, t: f32) -> &ShapeData {
        let idx = self.keyframes.partition_point(|(time, _)| *time <= t);
        &self.keyframes[idx.saturating_sub(1)].1
    }

    pub fn sample(&self, t: f32) -> Option<Outline> {
        self.shape_at(t).to_outline()
    }
}

/// [`PathAttacher`] for the shape-layer bezier encoding
///
/// Static: `{"a": 0, "k": <shape>}`. Keyframed: `{"a": 1, "k": [{"t": 0,
/// "s": [<shape>]}, ..]}`. Without `"a"`, the form of `k` decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapePathAttacher;

impl ShapePathAttacher {
    fn is_animated(property: &Value, k: &Value) -> bool {
        match property.get("a") {
            Some(Value::Bool(animated)) => *animated,
            Some(a) => a.as_f64().is_some_and(|a| a != 0.0),
            None => k
                .as_array()
                .and_then(|items| items.first())
                .is_some_and(|first| first.get("t").is_some()),
        }
    }

    fn parse_keyframes(k: &Value) -> Option<Vec<(f32, ShapeData)>> {
        k.as_array()?
            .iter()
            // A trailing keyframe may carry only a time.
            .filter(|kf| kf.get("s").is_some())
            .map(|kf| {
                let time = kf.get("t").and_then(Value::as_f64).unwrap_or(0.0) as f32;
                Some((time, ShapeData::from_json(kf.get("s")?)?))
            })
            .collect()
    }
}

impl PathAttacher for ShapePathAttacher {
    fn attach_path(&self, property: Option<&Value>, scope: &mut AnimatorScope) -> Option<Outline> {
        let property = property.filter(|p| p.is_object())?;
        let k = property.get("k")?;

        if !Self::is_animated(property, k) {
            return ShapeData::from_json(k)?.to_outline();
        }

        let animator = PathAnimator::new(Self::parse_keyframes(k)?)?;
        let initial = animator.sample(f32::NEG_INFINITY);
        scope.register(animator);
        initial
    }
}
