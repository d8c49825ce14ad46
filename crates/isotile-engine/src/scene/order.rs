use crate::iso::Entity;

/// Occlusion test between two entities whose screen bounds overlap.
///
/// Returns `true` when `a` must be drawn after `b`. `a` is expected to be the
/// earlier-registered entity of the pair: on an exact `x + y` tie the later one
/// (`b`) wins, so registration order breaks ties deterministically.
///
/// 1. `a` sits on or above the top of `b` (measured at `a`'s footprint): `a` in front.
/// 2. `b` sits on or above the top of `a`: `b` in front.
/// 3. Overlapping volumes: larger `x + y` is closer to the viewer.
pub fn draws_over(a: &Entity, b: &Entity) -> bool {
    let pa = a.position();
    let pb = b.position();
    let offset = pa.planar() - pb.planar();

    if pa.z >= pb.z + b.height(offset) {
        true
    } else if pb.z >= pa.z + a.height(offset) {
        false
    } else {
        pa.depth() > pb.depth()
    }
}
