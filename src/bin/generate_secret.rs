//! Prints a fresh random signing key, base64 encoded, for use as `SECRET_KEY`.

use devbook::config::SecretKey;

fn main() {
    println!("{}", SecretKey::generate().to_base64());
}
