//! Benchmark closures for summation.

use std::hint::black_box;
use std::sync::Arc;

use super::code::SumKernel;
use crate::registry::VariantClosure;
use crate::utils::{Sample, VariantInfo};

/// Build one timing closure per variant over the shared input.
///
/// In-place kernels own a scratch buffer that is refreshed from `data`
/// before every repetition, outside the timed region, so no repetition sees
/// a buffer folded by the previous one.
pub fn variant_closures<'a>(
    variants: Vec<VariantInfo<SumKernel>>,
    data: &Arc<Vec<f64>>,
) -> Vec<VariantClosure<'a>> {
    variants
        .into_iter()
        .map(|v| {
            let data = Arc::clone(data);
            let run: Box<dyn FnMut() -> (Sample, Option<f64>) + 'a> = match v.function {
                SumKernel::Pure(func) => Box::new(move || {
                    let (sample, sum) = crate::measure!(func(black_box(data.as_slice())));
                    (sample, Some(sum))
                }),
                SumKernel::InPlace(func) => {
                    let mut scratch = vec![0.0; data.len()];
                    Box::new(move || {
                        scratch.copy_from_slice(&data);
                        let (sample, sum) =
                            crate::measure!(func(black_box(scratch.as_mut_slice())));
                        (sample, Some(sum))
                    })
                }
            };

            VariantClosure {
                name: v.name,
                description: v.description,
                run,
            }
        })
        .collect()
}
