use simple_vector::SimpleVector;

fn main() {
    println!("--- Basic Usage Example ---");
    let mut v = SimpleVector::new();

    for i in 1..=5 {
        v.push_back(i * 10);
        println!("Pushed: {}, len: {}, cap: {}", i * 10, v.len(), v.capacity());
    }

    println!("Elements: {v}");

    let pos = v.find(&30);
    v.erase(pos);
    println!("After erasing 30: {v:?}");

    match v.at(10) {
        Ok(value) => println!("at(10) = {value}"),
        Err(err) => println!("at(10) failed: {err}"),
    }

    while let Some(value) = v.pop_back() {
        println!("Popped: {}, len: {}", value, v.len());
    }
}
