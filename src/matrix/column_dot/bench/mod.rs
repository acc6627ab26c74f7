//! Benchmark closures for the column dot product.

use std::hint::black_box;
use std::sync::Arc;

use super::code::ColumnDotFn;
use crate::matrix::SquareMatrix;
use crate::registry::VariantClosure;
use crate::utils::{Sample, VariantInfo};

/// Build one timing closure per variant.
///
/// Each closure owns its result buffer. The result sample is the sum of the
/// output vector, read after the clock stops so the writes stay observable.
pub fn variant_closures<'a>(
    variants: Vec<VariantInfo<ColumnDotFn>>,
    matrix: &Arc<SquareMatrix>,
    vector: &Arc<Vec<f64>>,
) -> Vec<VariantClosure<'a>> {
    variants
        .into_iter()
        .map(|v| {
            let matrix = Arc::clone(matrix);
            let vector = Arc::clone(vector);
            let func = v.function;
            let mut output = vec![0.0; matrix.dim()];

            let run: Box<dyn FnMut() -> (Sample, Option<f64>) + 'a> = Box::new(move || {
                let (sample, _) = crate::measure!({
                    func(black_box(&*matrix), black_box(vector.as_slice()), &mut output);
                    output.as_slice()
                });
                (sample, Some(output.iter().sum::<f64>()))
            });

            VariantClosure {
                name: v.name,
                description: v.description,
                run,
            }
        })
        .collect()
}
