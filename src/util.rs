use num_traits::{NumCast, ToPrimitive};

pub type IVec2 = na::Vector2<i32>;
pub type IVec3 = na::Vector3<i32>;

#[inline]
pub fn cast_vec2<T: NumCast, N: ToPrimitive + Copy>(v: na::Vector2<N>) -> Option<na::Vector2<T>> {
    let x = <T as NumCast>::from(v[0])?;
    let y = <T as NumCast>::from(v[1])?;

    Some(na::vector![x, y])
}

/// Returns true if the two inclusive-exclusive boxes `[a_min, a_max)` and `[b_min, b_max)` intersect.
#[inline]
pub fn boxes_overlap(a_min: IVec3, a_max: IVec3, b_min: IVec3, b_max: IVec3) -> bool {
    a_min.x < b_max.x
        && b_min.x < a_max.x
        && a_min.y < b_max.y
        && b_min.y < a_max.y
        && a_min.z < b_max.z
        && b_min.z < a_max.z
}
