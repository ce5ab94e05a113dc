use bean_macros::Bean;

#[derive(Default, Bean)]
struct UserService {
    #[bean(reference)]
    mail_service: String,
}

fn main() {}
