//! Iterative pairwise folding inside the input buffer.

/// Sum by repeatedly folding adjacent pairs into the front of `data`.
///
/// Each pass writes `data[j] = data[2j] + data[2j + 1]` and carries an
/// unpaired trailing element forward, halving the active length until one
/// value remains.
///
/// The buffer is overwritten. Callers that need their input afterwards must
/// pass a private copy.
pub fn in_place_pairwise_sum(data: &mut [f64]) -> f64 {
    let mut active = data.len();
    if active == 0 {
        return 0.0;
    }

    while active > 1 {
        let half = active / 2;
        // data[j] is written only after data[2j] and data[2j + 1] were read
        for j in 0..half {
            data[j] = data[2 * j] + data[2 * j + 1];
        }
        if active % 2 == 1 {
            data[half] = data[active - 1];
            active = half + 1;
        } else {
            active = half;
        }
    }

    data[0]
}
