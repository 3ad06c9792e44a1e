use simple_vector::simple_vector;

fn main() {
    println!("--- Cursor Example ---");
    let mut v = simple_vector![1, 2, 4];

    let mut c = v.begin();
    while c < v.end() {
        if let Some(value) = v.get_at(c) {
            println!("offset {}: {}", c.offset(), value);
        }
        c.step_forward();
    }

    // The buffer is full, so this insert reallocates.
    let stale = v.begin();
    let inserted = v.insert(v.begin() + 2, 3);
    println!("Inserted {:?} at offset {}", v.get_at(inserted), inserted.offset());
    println!("Old begin still current? {}", v.is_current(stale));
    println!("Distance begin..end = {}", v.end() - v.begin());
    println!("Result: {v}");
}
