use maud::{html, Markup, DOCTYPE};

pub fn home_page(api_base: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Climate API" }
            }
            body {
                section {
                    h1 { "Welcome to the Climate API" }
                    p { "Available routes:" }
                    ul {
                        li {
                            code { "/api/v1.0/precipitation" }
                            " - precipitation measurements"
                        }
                        li {
                            code { "/api/v1.0/stations" }
                            " - station names and station codes"
                        }
                        li {
                            code { "/api/v1.0/tobs" }
                            " - temperature observations over the previous 12 months"
                        }
                        li {
                            code { "/api/v1.0/{start}" }
                            " - temperature stats from a start date (yyyy-mm-dd), e.g. "
                            a href=(format!("{}/api/v1.0/2017-06-01", api_base)) {
                                (format!("{}/api/v1.0/2017-06-01", api_base))
                            }
                        }
                        li {
                            code { "/api/v1.0/{start}/{end}" }
                            " - temperature stats over a date range, e.g. "
                            a href=(format!("{}/api/v1.0/2016-08-23/2017-08-23", api_base)) {
                                (format!("{}/api/v1.0/2016-08-23/2017-08-23", api_base))
                            }
                        }
                    }
                    p {
                        a href="/docs" { "API Docs" }
                    }
                }
            }
        }
    }
}
