use bean_macros::Bean;

#[derive(Default, Bean)]
struct MailService {
    #[bean(name = "hostName")] host: String,
}

fn main() {}
