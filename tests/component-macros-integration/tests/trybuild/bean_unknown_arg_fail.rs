use bean_macros::Bean;

#[derive(Default, Bean)]
#[bean(singleton)]
struct MailService {
    port: i32,
}

fn main() {}
