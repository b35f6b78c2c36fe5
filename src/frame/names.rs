//! Column-name fixup.

use std::collections::{BTreeMap, HashSet};

/// Make `names` unique and non-empty, in place.
///
/// Empty names become `X0, X1, ...`. Every occurrence of a repeated name becomes
/// `<name>_0, <name>_1, ...`; repeated names are processed in sorted order. A proposed name that
/// already exists is skipped by advancing the counter.
pub(crate) fn fix_colnames(names: &mut [String]) {
    let mut missing = Vec::new();
    let mut places: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() {
            missing.push(i);
        } else {
            places.entry(name.clone()).or_default().push(i);
        }
    }
    places.retain(|_, idx| idx.len() > 1);
    if missing.is_empty() && places.is_empty() {
        return;
    }

    let mut taken: HashSet<String> = names.iter().cloned().collect();
    let mut counter = 0;
    for i in missing {
        let proposed = next_free(&taken, "X", &mut counter);
        taken.insert(proposed.clone());
        names[i] = proposed;
        counter += 1;
    }

    for (name, idx) in places {
        let mut counter = 0;
        for i in idx {
            let proposed = next_free(&taken, &format!("{name}_"), &mut counter);
            taken.insert(proposed.clone());
            names[i] = proposed;
            counter += 1;
        }
    }
}

fn next_free(taken: &HashSet<String>, prefix: &str, counter: &mut usize) -> String {
    loop {
        let proposed = format!("{prefix}{counter}");
        if !taken.contains(&proposed) {
            return proposed;
        }
        *counter += 1;
    }
}
