use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of mechanical kernel transformations.
///
/// Each operator announces itself with a sentinel marker comment; applying an
/// operator whose marker is already present is a no-op, which keeps repeated
/// application across generations from stacking the same change twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOperator {
    WidenWorkgroup,
    VectorizeAccumulator,
    UnrollInnerLoop,
    CoalesceMemoryAccess,
    HoistInvariantLoad,
    FuseMultiplyAdd,
}

impl MutationOperator {
    pub fn all() -> [MutationOperator; 6] {
        [
            Self::WidenWorkgroup,
            Self::VectorizeAccumulator,
            Self::UnrollInnerLoop,
            Self::CoalesceMemoryAccess,
            Self::HoistInvariantLoad,
            Self::FuseMultiplyAdd,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::WidenWorkgroup => "widen_workgroup",
            Self::VectorizeAccumulator => "vectorize_accumulator",
            Self::UnrollInnerLoop => "unroll_inner_loop",
            Self::CoalesceMemoryAccess => "coalesce_memory_access",
            Self::HoistInvariantLoad => "hoist_invariant_load",
            Self::FuseMultiplyAdd => "fuse_multiply_add",
        }
    }

    /// Sentinel comment marking this operator as already applied.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::WidenWorkgroup => "// tuned: widen-workgroup",
            Self::VectorizeAccumulator => "// tuned: vectorize-accumulator",
            Self::UnrollInnerLoop => "// tuned: unroll-inner-loop",
            Self::CoalesceMemoryAccess => "// tuned: coalesce-memory-access",
            Self::HoistInvariantLoad => "// tuned: hoist-invariant-load",
            Self::FuseMultiplyAdd => "// tuned: fuse-multiply-add",
        }
    }

    /// Apply the operator to a kernel, returning fresh source text.
    ///
    /// The input is never modified; an already-marked kernel comes back
    /// unchanged.
    pub fn apply(&self, source: &str) -> String {
        if source.contains(self.marker()) {
            return source.to_string();
        }

        let transformed = match self {
            Self::WidenWorkgroup => {
                let widened = source
                    .replacen("@workgroup_size(64)", "@workgroup_size(256)", 1)
                    .replacen("@workgroup_size(64,", "@workgroup_size(256,", 1);
                widened
            }
            Self::VectorizeAccumulator => source.replacen(
                "var acc: f32 = 0.0;",
                "var acc: vec4<f32> = vec4<f32>(0.0);",
                1,
            ),
            Self::UnrollInnerLoop => source.replacen("i = i + 1u", "i = i + 4u", 1),
            Self::CoalesceMemoryAccess => {
                // Row-major contiguous indexing: thread id becomes the fastest
                // moving dimension.
                source.replacen("row * stride + i", "i * stride + row", 1)
            }
            Self::HoistInvariantLoad => match source.find("fn main") {
                Some(pos) => match source[pos..].find('{') {
                    Some(brace) => {
                        let insert_at = pos + brace + 1;
                        format!(
                            "{}\n    let scale = params.scale;",
                            &source[..insert_at]
                        ) + &source[insert_at..]
                    }
                    None => source.to_string(),
                },
                None => source.to_string(),
            },
            Self::FuseMultiplyAdd => source.replacen("acc + a * b", "fma(a, b, acc)", 1),
        };

        format!("{}\n{}", self.marker(), transformed)
    }
}

impl fmt::Display for MutationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
