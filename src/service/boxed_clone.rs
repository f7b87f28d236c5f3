use super::base::Service;

pub(crate) struct BoxCloneService<Request, Response, Error>(
    pub(crate) Box<dyn CloneService<Request, Response = Response, Error = Error> + Send + Sync>,
);

pub(crate) trait CloneService<Request>: Service<Request> {
    #[must_use]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = Self::Response, Error = Self::Error> + Send + Sync>;
}

impl<Request, T> CloneService<Request> for T
where
    T: Service<Request> + Clone + Send + Sync + 'static,
{
    #[inline]
    fn clone_box(&self) -> Box<dyn CloneService<Request, Response = T::Response, Error = T::Error> + Send + Sync> {
        Box::new(self.clone())
    }
}

impl<Request, Response, Error> Clone for BoxCloneService<Request, Response, Error> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone_box())
    }
}

impl<Request, Response, Error> Service<Request> for BoxCloneService<Request, Response, Error> {
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        self.0.call(request)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{
            atomic::{AtomicU8, Ordering},
            Arc,
        },
    };

    use super::{BoxCloneService, Service as _};
    use crate::service::service_fn;

    #[test]
    fn test_clone_shares_captured_state() {
        let call_count = Arc::new(AtomicU8::new(0));
        let service: BoxCloneService<u8, u8, Infallible> = BoxCloneService(Box::new(service_fn({
            let call_count = call_count.clone();
            move |val: u8| {
                call_count.fetch_add(1, Ordering::SeqCst);
                Ok(val + 1)
            }
        })));

        assert_eq!(service.clone().call(1).unwrap(), 2);
        assert_eq!(service.clone().call(2).unwrap(), 3);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }
}
