#![forbid(unsafe_code)]

/// "Carry That Weight" lyrics, a small corpus for smoke tests and demos.
pub const BEATLES: &str = "Boy, you gotta carry that weight
Carry that weight a long time
Boy, you gonna carry that weight
Carry that weight a long time

I never give you my pillow
I only send you my invitation
And in the middle of the celebrations
I break down

Boy, you gotta carry that weight
Carry that weight a long time
Boy, you gotta carry that weight
You're gonna carry that weight a long time
";
