use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

pub fn create_random_secret(secret_len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..secret_len)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Random secret with a readable prefix, e.g. `rk_Xa81...` for api keys
/// or `msg_...` for locally minted message ids.
pub fn create_prefixed_secret(prefix: &str, secret_len: usize) -> String {
    format!("{}_{}", prefix, create_random_secret(secret_len))
}
