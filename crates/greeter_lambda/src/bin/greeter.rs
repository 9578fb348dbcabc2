use greeter_lambda::{greeting, GreetingEvent};
use lambda_runtime::{service_fn, Error, LambdaEvent};

async fn handle_request(event: LambdaEvent<GreetingEvent>) -> Result<String, Error> {
    Ok(greeting(&event.payload))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
