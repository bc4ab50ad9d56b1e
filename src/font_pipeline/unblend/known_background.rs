//! Known-background decomposition.
//!
//! An observed color `Cf` over a known background `Cb` satisfies
//! `Cf - Cb = a (T - Cb) + s (0 - Cb)` where `T` is the ink color, `a` the ink
//! opacity and `s` the opacity of a black drop shadow. Both unknowns are
//! solved by least squares over the three channels.

type Vec3 = [f32; 3];

/// Below this `|T - Cb|^2` the ink is indistinguishable from the background.
const MIN_CONTRAST: f32 = 1e-6;

/// Minimum squared sine between the ink and shadow directions for the joint
/// solve to be trusted.
const MIN_SEPARATION: f32 = 1e-4;

/// Ink and shadow opacity recovered for one pixel, both in `[0, 1]` with
/// `ink + shadow <= 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Decomposition {
    pub(crate) ink: f32,
    pub(crate) shadow: f32,
}

#[inline]
fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn ink_only(ink_dir: Vec3, delta: Vec3) -> f32 {
    let dd = dot(ink_dir, ink_dir);
    if dd < MIN_CONTRAST {
        return 0.0;
    }
    (dot(ink_dir, delta) / dd).clamp(0.0, 1.0)
}

/// Decomposes one normalized pixel. With `shadow == false` the shadow term is
/// left out of the model and always reported as zero.
pub(super) fn decompose(composite: Vec3, background: Vec3, target: Vec3, shadow: bool) -> Decomposition {
    let ink_dir = sub(target, background);
    let delta = sub(composite, background);

    if !shadow {
        return Decomposition {
            ink: ink_only(ink_dir, delta),
            shadow: 0.0,
        };
    }

    let shadow_dir = [-background[0], -background[1], -background[2]];
    let dd = dot(ink_dir, ink_dir);
    let ss = dot(shadow_dir, shadow_dir);
    let ds = dot(ink_dir, shadow_dir);
    let det = dd * ss - ds * ds;

    // Parallel directions (e.g. a black background, or ink that is a darker
    // shade of the background) cannot be told apart.
    if dd < MIN_CONTRAST || ss < MIN_CONTRAST || det <= MIN_SEPARATION * dd * ss {
        return Decomposition {
            ink: ink_only(ink_dir, delta),
            shadow: 0.0,
        };
    }

    let de = dot(ink_dir, delta);
    let se = dot(shadow_dir, delta);
    let ink = (de * ss - ds * se) / det;
    let shade = (dd * se - ds * de) / det;

    if shade <= 0.0 {
        // Brighter than any shadow could make it.
        return Decomposition {
            ink: ink_only(ink_dir, delta),
            shadow: 0.0,
        };
    }
    if ink <= 0.0 {
        return Decomposition {
            ink: 0.0,
            shadow: (se / ss).clamp(0.0, 1.0),
        };
    }

    let ink = ink.min(1.0);
    Decomposition {
        ink,
        shadow: shade.min(1.0 - ink),
    }
}
